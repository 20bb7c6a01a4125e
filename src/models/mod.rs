pub mod pin;
pub mod source;

pub use pin::{
    BoardDto, ExtraDto, LabeledMap, MediaType, PinDto, PinnerDto, ProfileImagesDto, StatsDto,
    VideoInfoDto, VideoQualityDto,
};
pub use source::SourcePin;
