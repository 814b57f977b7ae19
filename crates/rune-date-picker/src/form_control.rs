/// Form-control state resolved by the surrounding form layer.
///
/// The picker only reads these flags; it never computes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormControlFlags {
    pub id: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub invalid: bool,
}

impl FormControlFlags {
    /// Open and keyboard actions are permitted.
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.read_only
    }
}
