pub mod world_object;
