//! Four Pillars chart computation

pub mod assemble;
pub mod gods;
pub mod life_stage;
pub mod pillars;

pub use assemble::{compute_chart, compute_chart_at, Chart, LunarDate, Pillar};
pub use gods::{branch_hidden_gods, ten_god};
pub use life_stage::life_stage;
