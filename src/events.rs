use crate::point::Point;

/// How generations advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimMode {
    /// Nothing advances
    #[default]
    Stopped,

    /// Advance once per tick interval
    Ticking,

    /// Advance on [`Command::Step`] only
    Stepping,
}

/// Every way input can change a running simulation. Mapping raw device events onto these is up to
/// the front end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    ZoomIn,
    ZoomOut,

    /// Pointer pressed, start panning
    BeginDrag(Point),

    /// Pointer moved while pressed
    Drag(Point),

    /// Pointer released
    EndDrag,

    /// Camera back to identity, which cell editing requires
    ResetCamera,

    SetMode(SimMode),

    /// Advance one generation, if in [`SimMode::Stepping`]
    Step,

    ToggleStroke,

    /// Rebuild the grid from fresh cells
    ResetGrid,

    /// Cycle the state of the cell under the pointer
    CycleAt(Point),
}
