//! Starts two generations side by side and saves both results.
//!
//! ```sh
//! GOOGLE_API_KEY=... cargo run --example generate_video
//! ```

use std::sync::Arc;
use veo_studio::video::{
    compose, ArtifactStore, AspectRatio, GenerationDriver, GenerationRegistry,
    GenerationSettings, Resolution, VeoClient,
};
use veo_studio::StudioConfig;

#[tokio::main]
async fn main() -> veo_studio::Result<()> {
    let config = StudioConfig::from_env()?;
    let client = VeoClient::builder()
        .api_key(config.api_key.clone())
        .model(config.model)
        .build()?;
    let driver = GenerationDriver::new(
        client.clone(),
        client,
        ArtifactStore::new(),
        config.api_key.clone(),
    )
    .with_poll_policy(config.poll);
    let registry = GenerationRegistry::new(Arc::new(driver));

    let landscape = compose(
        "A lighthouse on a cliff at dusk, waves crashing below",
        None,
        GenerationSettings::new(AspectRatio::Landscape, Resolution::Hd).with_sound(true),
    )
    .await?;
    let portrait = compose(
        "A paper boat drifting down a rainy street",
        None,
        GenerationSettings::new(AspectRatio::Portrait, Resolution::Hd),
    )
    .await?;

    let jobs = [
        (registry.start(landscape), "lighthouse.mp4"),
        (registry.start(portrait), "paper-boat.mp4"),
    ];

    for (id, path) in jobs {
        let video = registry.join(id).await?;
        let store = registry.driver().store();
        store.save(&video.local_url, path).await?;
        store.revoke(&video.local_url);
        println!("{id}: saved {path} ({} bytes)", video.size_bytes);
    }

    Ok(())
}
