//! Real-world scenarios: the kiosk's voices, a busy mixer, and the
//! per-frame work the screens do.

mod mixer;
mod models;
mod voices;

pub use mixer::bench_mixer;
pub use models::bench_models;
pub use voices::bench_voices;
