//! Vuemigrate - Vue class component to Options API migrator
//!
//! Vuemigrate is a CLI tool and library for migrating class-based Vue
//! components (vue-class-component / vue-property-decorator / vuex-class)
//! into the declarative Options API (`export default defineComponent({…})`),
//! preserving every statement body, parameter list and type annotation
//! verbatim.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, reporting)
//! - `config`: Role taxonomy tables and configuration file loading
//! - `engine`: The migration engine (parse, classify, transform, emit)
//! - `error`: The migration error taxonomy
//! - `migrator`: File and directory drivers (.ts, .vue, batch, SFC)

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod migrator;
