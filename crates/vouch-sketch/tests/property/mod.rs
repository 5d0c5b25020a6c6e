mod sketch_properties;
