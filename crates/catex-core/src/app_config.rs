use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub input_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub output_dir: PathBuf,
    pub profile_path: Option<PathBuf>,
    /// Stock spread across every product's combinations.
    pub total_stock: u32,
    pub workers: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("input_dir", &self.input_dir)
            .field("catalog_path", &self.catalog_path)
            .field("output_dir", &self.output_dir)
            .field(
                "profile_path",
                &self
                    .profile_path
                    .as_ref()
                    .map_or_else(|| "[built-in]".to_string(), |p| p.display().to_string()),
            )
            .field("total_stock", &self.total_stock)
            .field("workers", &self.workers)
            .finish()
    }
}
