pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod canvas;

pub mod pattern;
pub mod light;
pub mod shape;
pub mod intersect;
pub mod world;

pub mod camera;
pub mod parallel;
pub mod scene;

pub use error::{ Error, Result };
