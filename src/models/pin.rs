use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Normalized pin returned by `GET /?url=`.
///
/// Every field is always serialized; missing source data shows up as
/// `null`, `""`, `false` or an empty collection, never as an absent key.
#[derive(Debug, Clone, Serialize)]
pub struct PinDto {
    pub pin_id: Option<String>,
    pub title: String,
    pub description: String,
    pub seo_title: String,
    pub created_at: String,
    pub dominant_color: Option<String>,
    pub media_type: MediaType,
    pub best_url: Option<String>,
    pub original_pinner: Option<PinnerDto>,
    pub current_pinner: Option<PinnerDto>,
    pub board: BoardDto,
    pub stats: StatsDto,
    pub tags: Vec<Value>,
    pub seo_breadcrumbs: Vec<Value>,
    pub all_images: LabeledMap<String>,
    pub video_info: Option<VideoInfoDto>,
    pub extra: ExtraDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Gif,
    Image,
}

#[derive(Debug, Clone, Serialize)]
pub struct PinnerDto {
    pub id: Option<String>,
    pub username: String,
    pub name: String,
    pub profile: ProfileImagesDto,
    pub followers: Option<Number>,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileImagesDto {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardDto {
    pub name: String,
    pub url: String,
    pub pin_count: Option<Number>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsDto {
    pub saves: Option<Number>,
    pub repins: Option<Number>,
    pub shares: Option<Number>,
    pub comments: Option<Number>,
}

/// Video summary. The scalar fields mirror the first quality that reported
/// a duration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoInfoDto {
    pub duration: Option<Number>,
    pub width: Option<Number>,
    pub height: Option<Number>,
    pub thumbnail: Option<String>,
    pub qualities: LabeledMap<VideoQualityDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoQualityDto {
    pub url: Option<String>,
    pub width: Option<Number>,
    pub height: Option<Number>,
    pub duration: Option<Number>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtraDto {
    pub is_promoted: bool,
    pub domain: String,
    pub category: String,
}

// ============================================================================
// Ordered label map
// ============================================================================

/// JSON object whose keys serialize in insertion order.
///
/// Labels come from fixed tables, so ordering is part of the response
/// contract regardless of how the serializer stores maps.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMap<V>(Vec<(&'static str, V)>);

impl<V> LabeledMap<V> {
    pub fn new() -> Self {
        LabeledMap(Vec::new())
    }

    pub fn insert(&mut self, label: &'static str, value: V) {
        self.0.push((label, value));
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.0.iter().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(l, _)| *l).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for LabeledMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for LabeledMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
