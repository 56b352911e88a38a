// Game layer: characters and the environment they walk around in

pub mod characters;
pub mod environment;
