mod model;

pub use model::{
    CalibrationWidget, DECK_ARTIFACTS, DeckData, DeckReport, KineticsWidget, SpectrumWidget,
    WidgetState, compute_deck,
};
