// taper-remote - keyboard and terminal remote for the taper daemon
// Library exports

pub mod cli;
pub mod client; // HTTP client and level types shared by both front-ends
pub mod config;
pub mod errors;
