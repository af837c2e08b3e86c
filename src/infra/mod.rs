//! Инфраструктурный слой вокруг игрового движка:
//! - RNG-реализации для движка;
//! - доменный seed и reseeding по раундам;
//! - генерация ID раундов;
//! - журнал сыгранных раундов.

pub mod ids;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use persistence::*;
pub use rng::*;
pub use rng_seed::RngSeed;
