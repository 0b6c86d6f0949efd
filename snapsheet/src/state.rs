/// A lightweight, serializable snapshot of the sheet's live state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetState {
    /// Live offset from the fully open position.
    pub offset: f32,
    /// Host-controlled open state at capture time. Not applied on restore.
    pub is_open: bool,
    /// Drag indicator tilt in degrees.
    pub indicator_rotation: f32,
}
