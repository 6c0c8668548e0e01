//! Output modalities and the fixed-size set that holds them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A kind of output a model can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Image,
    Video,
}

impl Modality {
    /// All modalities in declaration order.
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Image, Modality::Video];

    const fn bit(self) -> u8 {
        match self {
            Modality::Text => 0b001,
            Modality::Image => 0b010,
            Modality::Video => 0b100,
        }
    }

    /// Parse a modality label from upstream data. "vision" counts as Image.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Modality::Text),
            "image" | "vision" => Some(Modality::Image),
            "video" => Some(Modality::Video),
            _ => None,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Text => "Text",
            Modality::Image => "Image",
            Modality::Video => "Video",
        };
        f.write_str(s)
    }
}

/// Bit-set over [`Modality`]. Serializes as a sorted list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModalitySet(u8);

impl ModalitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn text_only() -> Self {
        Self::empty().with(Modality::Text)
    }

    pub fn with(mut self, modality: Modality) -> Self {
        self.insert(modality);
        self
    }

    pub fn insert(&mut self, modality: Modality) {
        self.0 |= modality.bit();
    }

    pub fn contains(&self, modality: Modality) -> bool {
        self.0 & modality.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Modality> + '_ {
        Modality::ALL.into_iter().filter(|m| self.contains(*m))
    }

    /// Display label: Video wins, then a pure Image set, then Multimodal.
    pub fn primary_type(&self) -> &'static str {
        if self.contains(Modality::Video) {
            "Video"
        } else if self.contains(Modality::Image) && self.len() == 1 {
            "Image"
        } else if self.len() > 1 {
            "Multimodal"
        } else {
            "Text"
        }
    }
}

impl FromIterator<Modality> for ModalitySet {
    fn from_iter<I: IntoIterator<Item = Modality>>(iter: I) -> Self {
        let mut set = ModalitySet::empty();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

impl Serialize for ModalitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ModalitySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Modality>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
