/// A named sub-field of a composite tag.
///
/// Pseudo-tags are never stored. They're projections of one stored value:
/// the Exif `Flash` integer, or a GPS coordinate string.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum PseudoTag {
    // flash bits
    Fired,
    ReturnLight,
    Mode,
    FunctionPresent,
    RedEyeReduction,

    // coordinate parts
    Deg,
    Min,
    Sec,
    Dir,
}

impl PseudoTag {
    /// The sub-fields of `Flash`.
    pub const FLASH: &'static [PseudoTag] = &[
        PseudoTag::Fired,
        PseudoTag::ReturnLight,
        PseudoTag::Mode,
        PseudoTag::FunctionPresent,
        PseudoTag::RedEyeReduction,
    ];

    /// The sub-fields of a GPS coordinate.
    pub const COORDINATE: &'static [PseudoTag] =
        &[PseudoTag::Deg, PseudoTag::Min, PseudoTag::Sec, PseudoTag::Dir];

    pub const fn name(&self) -> &'static str {
        match self {
            PseudoTag::Fired => "Fired",
            PseudoTag::ReturnLight => "ReturnLight",
            PseudoTag::Mode => "Mode",
            PseudoTag::FunctionPresent => "FunctionPresent",
            PseudoTag::RedEyeReduction => "RedEyeReduction",
            PseudoTag::Deg => "Deg",
            PseudoTag::Min => "Min",
            PseudoTag::Sec => "Sec",
            PseudoTag::Dir => "Dir",
        }
    }
}

impl core::fmt::Display for PseudoTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for PseudoTag {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        PseudoTag::FLASH
            .iter()
            .chain(PseudoTag::COORDINATE)
            .find(|p| p.name() == value)
            .copied()
            .ok_or(())
    }
}
