pub mod arbiter;
pub mod resolver;
pub mod stance;
pub mod state;

pub use arbiter::{arbitrate, Resolution};
pub use resolver::resolve;
pub use stance::Stance;
pub use state::{
    CombatState, CombatStats, CombatStore, CooldownKey, Cooldowns, PendingDamage, PendingKind,
};
