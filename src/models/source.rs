use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Deserialize a field as `Some(T)` when it has the expected JSON type and
/// `None` when it is null or anything else.
///
/// A mistyped field never fails the enclosing record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an array element by element, keeping each element's position.
/// Elements of the wrong shape become `None`; a non-array becomes `None`.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<Option<T>>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

// ============================================================================
// Pin
// ============================================================================

/// The pin object found at `response.data.v3GetPinQuery.data` in the relay
/// payload. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePin {
    #[serde(default, deserialize_with = "lenient")]
    pub entity_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub grid_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dominant_color: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub board: Option<SourceBoard>,
    #[serde(default, deserialize_with = "lenient")]
    pub origin_pinner: Option<SourcePinner>,
    #[serde(default, deserialize_with = "lenient")]
    pub pinner: Option<SourcePinner>,

    #[serde(default, deserialize_with = "lenient")]
    pub aggregated_pin_data: Option<AggregatedPinData>,
    #[serde(default, deserialize_with = "lenient")]
    pub repin_count: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub share_count: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub pin_join: Option<PinJoin>,

    #[serde(rename = "imageSpec_orig", default, deserialize_with = "lenient")]
    pub image_spec_orig: Option<ImageRef>,
    #[serde(rename = "imageSpec_736x", default, deserialize_with = "lenient")]
    pub image_spec_736x: Option<ImageRef>,
    #[serde(rename = "imageSpec_564x", default, deserialize_with = "lenient")]
    pub image_spec_564x: Option<ImageRef>,
    #[serde(rename = "imageSpec_474x", default, deserialize_with = "lenient")]
    pub image_spec_474x: Option<ImageRef>,
    #[serde(rename = "imageSpec_236x", default, deserialize_with = "lenient")]
    pub image_spec_236x: Option<ImageRef>,
    #[serde(rename = "imageSpec_136x136", default, deserialize_with = "lenient")]
    pub image_spec_136x136: Option<ImageRef>,
    #[serde(rename = "imageSpec_60x60", default, deserialize_with = "lenient")]
    pub image_spec_60x60: Option<ImageRef>,
    #[serde(rename = "imageSpec_170x", default, deserialize_with = "lenient")]
    pub image_spec_170x: Option<ImageRef>,
    #[serde(rename = "imageSpec_600x315", default, deserialize_with = "lenient")]
    pub image_spec_600x315: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_large_url: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub embed: Option<Embed>,
    #[serde(default, deserialize_with = "lenient")]
    pub story_pin_data: Option<StoryPinData>,

    #[serde(default, deserialize_with = "lenient")]
    pub is_promoted: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
}

impl SourcePin {
    /// Video structure of the first block on the first story page, the only
    /// place the closeup page puts playable video.
    pub fn video_data(&self) -> Option<&VideoData> {
        self.story_pin_data
            .as_ref()?
            .pages
            .as_ref()?
            .first()?
            .as_ref()?
            .blocks
            .as_ref()?
            .first()?
            .as_ref()?
            .video_data_v2
            .as_ref()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBoard {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pin_count: Option<Number>,
}

/// Author record; used for both `originPinner` and `pinner`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePinner {
    #[serde(default, deserialize_with = "lenient")]
    pub entity_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_small_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_medium_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_large_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub follower_count: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_verified_merchant: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPinData {
    #[serde(default, deserialize_with = "lenient")]
    pub aggregated_stats: Option<AggregatedStats>,
    #[serde(default, deserialize_with = "lenient")]
    pub comment_count: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AggregatedStats {
    #[serde(default, deserialize_with = "lenient")]
    pub saves: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinJoin {
    #[serde(default, deserialize_with = "lenient")]
    pub visual_annotation: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo_breadcrumbs: Option<Vec<Value>>,
}

/// Any `{ "url": ... }` image reference (`imageSpec_*`, `images`).
#[derive(Debug, Default, Deserialize)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Embed {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub src: Option<String>,
}

// ============================================================================
// Story / video
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct StoryPinData {
    #[serde(default, deserialize_with = "lenient_items")]
    pub pages: Option<Vec<Option<StoryPage>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoryPage {
    #[serde(default, deserialize_with = "lenient_items")]
    pub blocks: Option<Vec<Option<StoryBlock>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryBlock {
    #[serde(default, deserialize_with = "lenient")]
    pub video_data_v2: Option<VideoData>,
}

/// Quality-labelled variant lists of a story video block.
#[derive(Debug, Default, Deserialize)]
pub struct VideoData {
    #[serde(rename = "videoList720P", default, deserialize_with = "lenient")]
    pub video_list_720p: Option<VariantList>,
    #[serde(rename = "videoListMobile", default, deserialize_with = "lenient")]
    pub video_list_mobile: Option<VariantList>,
    #[serde(rename = "videoListEXP3", default, deserialize_with = "lenient")]
    pub video_list_exp3: Option<VariantList>,
    #[serde(rename = "videoListEXP4", default, deserialize_with = "lenient")]
    pub video_list_exp4: Option<VariantList>,
    #[serde(rename = "videoListEXP5", default, deserialize_with = "lenient")]
    pub video_list_exp5: Option<VariantList>,
    #[serde(rename = "videoListEXP6", default, deserialize_with = "lenient")]
    pub video_list_exp6: Option<VariantList>,
    #[serde(rename = "videoListEXP7", default, deserialize_with = "lenient")]
    pub video_list_exp7: Option<VariantList>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoVariant {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
}

/// A keyed map of video variants (e.g. `{"v720P": {...}}`) kept in document
/// order.
///
/// Falsy entries (`null`, `false`, `0`, `""`) hold `None`. Any other
/// non-object entry holds an empty variant.
#[derive(Debug, Default)]
pub struct VariantList(Vec<(String, Option<VideoVariant>)>);

impl VariantList {
    /// The first entry in document order, or `None` when it is falsy.
    pub fn first(&self) -> Option<&VideoVariant> {
        self.0.first()?.1.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&VideoVariant> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, variant)| variant.as_ref())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl<'de> Deserialize<'de> for VariantList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VariantListVisitor;

        impl<'de> Visitor<'de> for VariantListVisitor {
            type Value = VariantList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of video variants")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut variants = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    let variant = if is_falsy(&value) {
                        None
                    } else {
                        Some(serde_json::from_value(value).unwrap_or_default())
                    };
                    variants.push((key, variant));
                }
                Ok(VariantList(variants))
            }
        }

        deserializer.deserialize_map(VariantListVisitor)
    }
}
