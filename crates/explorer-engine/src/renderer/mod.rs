pub mod camera;
pub mod composer;
pub mod instance;
pub mod layer;
pub mod trail;
pub mod vector;
