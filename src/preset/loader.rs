//! Asset loader for interaction presets from "interaction.ron" files.

use bevy::{
    asset::{io::Reader, AssetLoader, AsyncReadExt, LoadContext},
    log::error,
    utils::BoxedFuture,
};
use serde_ron::de::from_bytes;

use crate::errors::PresetLoaderError;

use super::InteractionPreset;

/// Load interaction presets from ron assets.
#[derive(Default)]
pub struct InteractionPresetLoader;

impl AssetLoader for InteractionPresetLoader {
    type Asset = InteractionPreset;
    type Settings = ();
    type Error = PresetLoaderError;

    fn load<'a>(
        &'a self,
        reader: &'a mut Reader,
        _settings: &'a Self::Settings,
        load_context: &'a mut LoadContext,
    ) -> BoxedFuture<'a, Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let preset = parse_ron_preset(&bytes);
            if let Err(e) = &preset {
                error!("Error parsing {:?}: {e:}", load_context.path());
            }
            Ok(preset?)
        })
    }

    fn extensions(&self) -> &[&str] {
        &["interaction.ron"]
    }
}

/// Parse a preset from a byte slice.
pub(crate) fn parse_ron_preset(
    bytes: &[u8],
) -> Result<InteractionPreset, serde_ron::error::SpannedError> {
    from_bytes::<InteractionPreset>(bytes)
}
