//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::collections::BTreeMap;
use std::sync::Once;

use crate::model::{
    Apis,
    CustomApi,
    Endpoint,
    Manifest,
    PrivacyAndCompliance,
    PrivacyFlags,
    PublishingInformation,
    Skill,
};

/// `init_tracing` の一回限りの初期化
static TRACING: Once = Once::new();

/// テスト出力にログを流す（`RUST_LOG` で制御）
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// 最小構成のスキルマニフェスト
pub(crate) fn sample_skill() -> Skill {
    Skill {
        manifest: Manifest {
            manifest_version: "1.0".to_string(),
            publishing_information: PublishingInformation {
                locales: BTreeMap::new(),
                is_available_worldwide: true,
                distribution_countries: vec![],
                testing_instructions: String::new(),
                category: "ORGANIZERS_AND_ASSISTANTS".to_string(),
            },
            apis: Apis {
                custom: CustomApi {
                    endpoint: Endpoint {
                        uri: "https://skill.example.com/alexa".to_string(),
                        ssl_certificate_type: Some("Wildcard".to_string()),
                    },
                },
            },
            permissions: vec![],
            privacy_and_compliance: PrivacyAndCompliance {
                flags: PrivacyFlags::default(),
                locales: BTreeMap::new(),
            },
        },
    }
}
