pub mod city;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod overlay;
pub mod predictor;
pub mod routing;
pub mod trip;
pub mod util;
