//=========================================================================
// Aetheric Stage: Library Root
//
// This crate manages a single content area whose content changes only
// behind a full-screen curtain.
//
// Responsibilities:
// - Expose the stage facade (`Stage`, `StageBuilder`)
// - Keep the transition machinery (queue, controller, context) internal
// - Leave rendering to the host through `StageSurface` and `Curtain`
//
// Typical usage:
// ```ignore
// use aetheric_stage::prelude::*;
//
// let mut stage = StageBuilder::new("title", TitleScreen::new())
//     .with_content_resolver(screens)
//     .build(surface);
//
// stage.add(AddContent::new("options", "options"));
// loop {
//     stage.pump();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the building blocks (history, operations, curtains,
// assets). It is public so hosts can implement their own visuals,
// curtains and resolvers.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `stage` defines the facade and its builder.
//
mod stage;

//--- Public Exports ------------------------------------------------------

pub use stage::{Stage, StageBuilder, StageStatus};
