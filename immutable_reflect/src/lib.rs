/* Immutable Type Runtime
 *
 * Executes the plans of a generation pass so the synthesized protocol can be
 * exercised without a target-language compiler: singleton defaults, builders
 * with dirty tracking and caching, construction from builders and fluent
 * setters on immutable instances.
 */

pub mod builder;
pub mod errors;
pub mod instance;
mod model;
pub mod runtime;
pub mod value;

pub use builder::Builder;
pub use errors::{ReflectError, ReflectResult};
pub use instance::Instance;
pub use runtime::Runtime;
pub use value::Value;
