pub mod chime;
pub mod run;
pub mod sounds;
