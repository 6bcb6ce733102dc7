use crate::AppSettings;
use color_eyre::eyre::Result;
use std::path::Path;

pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv so local secrets overwrite the yaml defaults.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let settings = builder.build()?.try_deserialize::<AppSettings>()?;

    Ok(settings)
}
