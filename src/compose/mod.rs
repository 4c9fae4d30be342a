/*!
 * Spread composition: the page-alignment and layout engine.
 *
 * - `source_doc`: read-only view of the source paper PDF
 * - `embed`: turning pages of one document into Form XObjects of another
 * - `spread`: the composer state machine emitting double-width spread pages
 */

pub mod embed;
pub mod source_doc;
pub mod spread;

pub use source_doc::{PageRect, SourceDocument};
pub use spread::{ComposeStats, SpreadComposer, fit_into_half};
