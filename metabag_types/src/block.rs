/// One of the four named sub-stores of a metadata bag.
///
/// Each block corresponds to a legacy tag standard. GPS data that arrives
/// through XMP still lands in [`Block::Gps`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Block {
    /// IPTC IIM, record 2 (application record).
    Iptc,

    /// TIFF 6.0 baseline tags (IFD 0).
    Tiff,

    /// Exif 2.2 private IFD.
    Exif,

    /// GPS IFD, shared with the XMP `exif:GPS*` properties.
    Gps,
}

impl Block {
    /// Every block, in storage order.
    pub const ALL: [Block; 4] = [Block::Iptc, Block::Tiff, Block::Exif, Block::Gps];

    /// The block's name, as used by the command layer.
    ///
    /// ```
    /// use metabag_types::Block;
    ///
    /// assert_eq!(Block::Gps.name(), "GPS");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            Block::Iptc => "IPTC",
            Block::Tiff => "TIFF",
            Block::Exif => "EXIF",
            Block::Gps => "GPS",
        }
    }
}

impl core::fmt::Display for Block {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Block {
    type Error = ();

    /// Block names are matched without regard to ASCII case.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Block::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(value))
            .ok_or(())
    }
}
