//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SkillSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: SkillSettings,

    /// プロジェクトのルートパス
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SkillSettings::default(), project_root: None }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイルがなければデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(root) = &project_root {
            loader::load_from_project(root)?.map_or_else(SkillSettings::default, |loaded| {
                tracing::debug!("Loaded project settings: {:?}", loaded);
                loaded
            })
        } else {
            SkillSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// - バリデーションエラー（現在の設定は変更されない）
    pub fn update_settings(&mut self, new_settings: SkillSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &SkillSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// スキルパッケージの出力先
    ///
    /// プロジェクトルートがあればそこからの相対パスとして解決する
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        let output_dir = Path::new(&self.current_settings.output_dir);
        self.project_root.as_ref().map_or_else(|| output_dir.to_path_buf(), |root| root.join(output_dir))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::loader::CONFIG_FILE_NAME;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_that!(manager.get_settings(), eq(&SkillSettings::default()));
        assert!(manager.project_root().is_none());
    }

    /// load_settings: project_root が None の場合
    #[rstest]
    fn test_load_settings_without_project() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert!(result.is_ok());
        assert!(manager.project_root().is_none());
        assert_that!(manager.output_dir(), eq(&PathBuf::from("skill-package")));
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"category": "GAMES", "outputDir": "out"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_that!(manager.get_settings().category, eq("GAMES"));
        assert_that!(manager.output_dir(), eq(&temp_dir.path().join("out")));
    }

    /// load_settings: 無効な設定ファイルは読み込まない
    #[rstest]
    fn test_load_settings_with_invalid_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"category": ""}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert!(manager.project_root().is_none());
    }

    /// update_settings: 有効な設定で更新成功
    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let new_settings = SkillSettings { category: "EDUCATION_AND_REFERENCE".to_string(), ..SkillSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert_that!(manager.get_settings().category, eq("EDUCATION_AND_REFERENCE"));
    }

    /// update_settings: 無効な設定でエラー
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let new_settings = SkillSettings { manifest_version: String::new(), ..SkillSettings::default() };

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
        assert_that!(manager.get_settings().manifest_version, eq("1.0"));
    }
}
