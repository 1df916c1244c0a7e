pub mod actor;
pub mod ai;
pub mod combat;
pub mod enemy;
pub mod error;
pub mod flags;
pub mod host;
pub mod iact;
pub mod machine;
pub mod props;
pub mod rng;
pub mod scene;
pub mod scheduler;
pub mod states;
pub mod transition;
pub mod vars;
pub mod weapons;

pub use actor::Actor;
pub use ai::{Brain, Decision, DecisionCode};
pub use combat::{CombatResolver, HitOutcome};
pub use enemy::{ArchetypeId, EnemySelector, MetEnemiesWindow};
pub use error::{EngineError, IactError};
pub use flags::BitFlagRegister;
pub use host::{Collaborators, Input};
pub use iact::IactCommandDispatcher;
pub use machine::{ActorStateMachine, StepButtons};
pub use rng::SessionRng;
pub use scene::{SceneCategory, SceneKind};
pub use scheduler::{BattleSession, TickReport};
pub use transition::SceneTransitionManager;
pub use weapons::{Weapon, WeaponInventory};
