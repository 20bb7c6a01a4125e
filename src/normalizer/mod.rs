//! Flattening of the relay pin record into [`PinDto`].
//!
//! Every output field is derived through a first-present-wins chain of
//! optional lookups. Strings count as present only when non-empty.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::source::{ImageRef, SourcePin, SourcePinner, VariantList, VideoData};
use crate::models::{
    BoardDto, ExtraDto, LabeledMap, MediaType, PinDto, PinnerDto, ProfileImagesDto, StatsDto,
    VideoInfoDto, VideoQualityDto,
};

/// JSON pointer to the pin record inside the closeup relay payload.
pub const PIN_DATA_POINTER: &str = "/response/data/v3GetPinQuery/data";

type ImageAccessor = fn(&SourcePin) -> Option<&ImageRef>;
type VariantListAccessor = fn(&VideoData) -> Option<&VariantList>;

/// `imageSpec_<label>` fields, in output order.
const IMAGE_SIZES: [(&str, ImageAccessor); 9] = [
    ("orig", |p| p.image_spec_orig.as_ref()),
    ("736x", |p| p.image_spec_736x.as_ref()),
    ("564x", |p| p.image_spec_564x.as_ref()),
    ("474x", |p| p.image_spec_474x.as_ref()),
    ("236x", |p| p.image_spec_236x.as_ref()),
    ("136x136", |p| p.image_spec_136x136.as_ref()),
    ("60x60", |p| p.image_spec_60x60.as_ref()),
    ("170x", |p| p.image_spec_170x.as_ref()),
    ("600x315", |p| p.image_spec_600x315.as_ref()),
];

/// Video variant lists, in output order.
const VIDEO_QUALITIES: [(&str, VariantListAccessor); 7] = [
    ("720p", |v| v.video_list_720p.as_ref()),
    ("mobile", |v| v.video_list_mobile.as_ref()),
    ("exp3", |v| v.video_list_exp3.as_ref()),
    ("exp4", |v| v.video_list_exp4.as_ref()),
    ("exp5", |v| v.video_list_exp5.as_ref()),
    ("exp6", |v| v.video_list_exp6.as_ref()),
    ("exp7", |v| v.video_list_exp7.as_ref()),
];

/// Normalize a closeup relay payload.
///
/// Fails only when the payload has no pin record at [`PIN_DATA_POINTER`].
pub fn normalize(payload: &Value) -> AppResult<PinDto> {
    let data = payload
        .pointer(PIN_DATA_POINTER)
        .filter(|v| v.is_object())
        .ok_or(AppError::InvalidShape)?;

    let pin = SourcePin::deserialize(data).map_err(|e| {
        tracing::warn!(error = %e, "Pin record did not match the expected shape");
        AppError::InvalidShape
    })?;

    Ok(normalize_pin(&pin))
}

/// Map an already-decoded pin record to the output contract.
pub fn normalize_pin(pin: &SourcePin) -> PinDto {
    let media_type = detect_media_type(pin);

    PinDto {
        pin_id: non_empty(&pin.entity_id),
        title: non_empty(&pin.title)
            .or_else(|| non_empty(&pin.grid_title))
            .unwrap_or_default(),
        description: pin
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        seo_title: non_empty(&pin.seo_title).unwrap_or_default(),
        created_at: non_empty(&pin.created_at).unwrap_or_default(),
        dominant_color: non_empty(&pin.dominant_color),
        media_type,
        best_url: best_url(pin, media_type),
        original_pinner: pin.origin_pinner.as_ref().map(format_pinner),
        current_pinner: pin.pinner.as_ref().map(format_pinner),
        board: BoardDto {
            name: pin
                .board
                .as_ref()
                .and_then(|b| non_empty(&b.name))
                .unwrap_or_default(),
            url: pin
                .board
                .as_ref()
                .and_then(|b| non_empty(&b.url))
                .unwrap_or_default(),
            pin_count: pin.board.as_ref().and_then(|b| b.pin_count.clone()),
        },
        stats: StatsDto {
            saves: pin
                .aggregated_pin_data
                .as_ref()
                .and_then(|a| a.aggregated_stats.as_ref())
                .and_then(|s| s.saves.clone()),
            repins: pin.repin_count.clone(),
            shares: pin.share_count.clone(),
            comments: pin
                .aggregated_pin_data
                .as_ref()
                .and_then(|a| a.comment_count.clone()),
        },
        tags: pin
            .pin_join
            .as_ref()
            .and_then(|j| j.visual_annotation.clone())
            .unwrap_or_default(),
        seo_breadcrumbs: pin
            .pin_join
            .as_ref()
            .and_then(|j| j.seo_breadcrumbs.clone())
            .unwrap_or_default(),
        all_images: collect_images(pin),
        video_info: pin.video_data().map(collect_video_info),
        extra: ExtraDto {
            is_promoted: pin.is_promoted.unwrap_or(false),
            domain: non_empty(&pin.domain).unwrap_or_default(),
            category: non_empty(&pin.category).unwrap_or_default(),
        },
    }
}

pub fn detect_media_type(pin: &SourcePin) -> MediaType {
    if pin.video_data().is_some() {
        return MediaType::Video;
    }

    let embed = pin.embed.as_ref();
    let gif_type = embed.and_then(|e| e.kind.as_deref()) == Some("gif");
    let gif_src = embed
        .and_then(|e| e.src.as_deref())
        .is_some_and(|src| src.ends_with(".gif"));

    if gif_type || gif_src {
        MediaType::Gif
    } else {
        MediaType::Image
    }
}

fn best_url(pin: &SourcePin, media_type: MediaType) -> Option<String> {
    match media_type {
        MediaType::Video => {
            let video = pin.video_data()?;
            variant_url(video.video_list_720p.as_ref(), "v720P")
                .or_else(|| variant_url(video.video_list_mobile.as_ref(), "vHLSV3MOBILE"))
        }
        MediaType::Gif => pin
            .embed
            .as_ref()
            .and_then(|e| non_empty(&e.src))
            .or_else(|| image_url(pin.image_spec_orig.as_ref())),
        MediaType::Image => image_url(pin.image_spec_orig.as_ref())
            .or_else(|| image_url(pin.images.as_ref()))
            .or_else(|| non_empty(&pin.image_large_url)),
    }
}

fn variant_url(list: Option<&VariantList>, key: &str) -> Option<String> {
    list.and_then(|l| l.get(key)).and_then(|v| non_empty(&v.url))
}

fn image_url(image: Option<&ImageRef>) -> Option<String> {
    image.and_then(|i| non_empty(&i.url))
}

fn format_pinner(pinner: &SourcePinner) -> PinnerDto {
    PinnerDto {
        id: non_empty(&pinner.entity_id),
        username: non_empty(&pinner.username).unwrap_or_default(),
        name: non_empty(&pinner.full_name).unwrap_or_default(),
        profile: ProfileImagesDto {
            small: non_empty(&pinner.image_small_url).unwrap_or_default(),
            medium: non_empty(&pinner.image_medium_url).unwrap_or_default(),
            large: non_empty(&pinner.image_large_url).unwrap_or_default(),
        },
        followers: pinner.follower_count.clone(),
        verified: pinner.is_verified_merchant.unwrap_or(false),
    }
}

/// Sparse size-label → URL map, plus the generic and large image URLs.
pub fn collect_images(pin: &SourcePin) -> LabeledMap<String> {
    let mut images = LabeledMap::new();

    for (label, accessor) in IMAGE_SIZES {
        if let Some(url) = image_url(accessor(pin)) {
            images.insert(label, url);
        }
    }
    if let Some(url) = image_url(pin.images.as_ref()) {
        images.insert("images", url);
    }
    if let Some(url) = non_empty(&pin.image_large_url) {
        images.insert("large", url);
    }

    images
}

pub fn collect_video_info(video: &VideoData) -> VideoInfoDto {
    let mut info = VideoInfoDto::default();

    for (label, accessor) in VIDEO_QUALITIES {
        let Some(variant) = accessor(video).and_then(VariantList::first) else {
            continue;
        };

        let quality = VideoQualityDto {
            url: non_empty(&variant.url),
            width: variant.width.clone(),
            height: variant.height.clone(),
            duration: variant.duration.clone(),
            thumbnail: non_empty(&variant.thumbnail),
        };

        if info.duration.is_none() && quality.duration.is_some() {
            info.duration = quality.duration.clone();
            info.width = quality.width.clone();
            info.height = quality.height.clone();
            info.thumbnail = quality.thumbnail.clone();
        }

        info.qualities.insert(label, quality);
    }

    info
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}
