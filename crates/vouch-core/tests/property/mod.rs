mod fixed_properties;
