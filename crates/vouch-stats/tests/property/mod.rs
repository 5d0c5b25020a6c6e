mod stats_properties;
