//! Character skills, vocations, and persistence.

pub mod save;
pub mod skills;
pub mod vocation;

pub use skills::SkillType;
pub use vocation::Vocation;
