//! # Kaiwa - Scenario Compilation and Conversation Runtime Engine
//!
//! **Kaiwa** ingests flow-charts authored in an external visual
//! scenario-design tool and interprets them live to drive multi-turn
//! customer-support conversations. The diagram export is compiled ahead
//! of time into an immutable, durable-id-addressed scenario graph; a
//! lightweight per-session runtime then walks that graph turn-by-turn.
//!
//! ## Core Workflow
//!
//! 1.  **Parse**: load the tool's JSON export into a [`diagram::DiagramDocument`].
//! 2.  **Compile**: run [`compiler::ScenarioCompiler`] to normalize every
//!     step element into a canonical node, resolve all cross-references
//!     (containment, name-based jumps) in staged phases, and publish a
//!     [`scenario::ScenarioGraph`].
//! 3.  **Converse**: create a [`runtime::ConversationRuntime`] over the
//!     published graph and feed it session events. Every turn yields the
//!     bot's messages, the presentable options, and at most one typed
//!     [`runtime::Effect`] for external collaborators to carry out.
//!
//! The engine performs no I/O of its own: mail delivery, link opening,
//! file export and operator handover are all requested as `Effect`
//! values, never executed here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kaiwa::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let diagram_json = std::fs::read_to_string("diagram.json")?;
//!
//!     // Compile the export into a published scenario graph.
//!     let (graph, report) = ScenarioCompiler::from_json(&diagram_json)?.compile()?;
//!     for warning in &report.warnings {
//!         eprintln!("publish warning: {:?}", warning);
//!     }
//!
//!     // Drive a conversation.
//!     let runtime = ConversationRuntime::new(Arc::new(graph));
//!     let (mut session, turn) = runtime.open("visitor-42");
//!     for message in &turn.messages {
//!         println!("bot> {}", message);
//!     }
//!     for option in &turn.options {
//!         println!("  [{}] {}", option.id, option.label);
//!     }
//!
//!     // The user picks the first option.
//!     if let Some(choice) = turn.options.first() {
//!         let next = runtime.handle(
//!             &mut session,
//!             SessionEvent::Select { option: choice.id },
//!         )?;
//!         println!("bot> {:?}", next.messages);
//!         if let Some(effect) = next.effect {
//!             // Hand the effect to the mailer / webhook worker / etc.
//!             println!("effect requested: {:?}", effect);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod diagram;
pub mod error;
pub mod prelude;
pub mod runtime;
pub mod scenario;
