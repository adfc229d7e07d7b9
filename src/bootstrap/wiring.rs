//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Resolve where local state lives
//! - Create the infra implementations named by the config
//! - Group them into `AppDeps`
//!
//! ## Prohibited
//!
//! - No business logic
//!
//! > **This is the only place allowed to depend on ct-infra + ct-app simultaneously.**
//! > But this privilege is only for "assembly", not for "decision making".

use std::sync::Arc;

use anyhow::{bail, Context};
use ct_app::{AppDeps, UserDataService};
use ct_core::app_dirs::AppDirs;
use ct_core::config::AppConfig;
use ct_core::ports::{AppDirsPort, AuthPort, CatalogPort, DocumentStorePort, PreferenceStorePort};
use ct_core::preferences::layout::{
    LOGIN_STATE_NAMESPACE, ONBOARDING_NAMESPACE, REMOTE_SESSION_NAMESPACE, USER_PREFS_NAMESPACE,
};
use ct_infra::catalog::seed;
use ct_infra::remote::LOCAL_USERS_FILE;
use ct_infra::{
    DirsAppDirsAdapter, DocumentCatalog, FilePreferenceStore, FirebaseUserService,
    InMemoryCatalog, InMemoryUserService,
};
use tracing::info;

/// An empty `data_dir` means the platform data-local directory.
pub fn resolve_app_dirs(config: &AppConfig) -> anyhow::Result<AppDirs> {
    if !config.data_dir.as_os_str().is_empty() {
        return Ok(AppDirs {
            app_data_root: config.data_dir.clone(),
        });
    }
    Ok(DirsAppDirsAdapter::new().get_app_dirs()?)
}

struct RemoteServices {
    auth: Arc<dyn AuthPort>,
    documents: Arc<dyn DocumentStorePort>,
}

async fn create_remote(
    config: &AppConfig,
    app_dirs: &AppDirs,
) -> anyhow::Result<RemoteServices> {
    match config.remote_provider.as_str() {
        "" | "memory" => {
            // Carries the built-in catalog so `catalog.source = "remote"` works offline.
            let path = app_dirs.remote_dir().join(LOCAL_USERS_FILE);
            let service = InMemoryUserService::open(&path, seed::documents())
                .await
                .with_context(|| format!("Failed to open local users at {}", path.display()))?;
            let service = Arc::new(service);
            Ok(RemoteServices {
                auth: service.clone(),
                documents: service,
            })
        }
        "firebase" => {
            let service = Arc::new(
                FirebaseUserService::new(&config.firebase)?
                    .with_session_store(preference_store(app_dirs, REMOTE_SESSION_NAMESPACE)),
            );
            Ok(RemoteServices {
                auth: service.clone(),
                documents: service,
            })
        }
        other => bail!("unknown remote provider `{other}` (expected `memory` or `firebase`)"),
    }
}

fn create_catalog(
    config: &AppConfig,
    documents: &Arc<dyn DocumentStorePort>,
) -> anyhow::Result<Arc<dyn CatalogPort>> {
    match config.catalog_source.as_str() {
        "" | "memory" => Ok(Arc::new(InMemoryCatalog::seeded())),
        "remote" => Ok(Arc::new(DocumentCatalog::new(documents.clone()))),
        other => bail!("unknown catalog source `{other}` (expected `memory` or `remote`)"),
    }
}

fn preference_store(app_dirs: &AppDirs, namespace: &str) -> Arc<dyn PreferenceStorePort> {
    Arc::new(FilePreferenceStore::in_dir(
        app_dirs.preferences_dir(),
        namespace,
    ))
}

fn name_or_memory(name: &str) -> &str {
    if name.is_empty() {
        "memory"
    } else {
        name
    }
}

pub async fn wire_dependencies(
    config: &AppConfig,
    app_dirs: &AppDirs,
) -> anyhow::Result<AppDeps> {
    let remote = create_remote(config, app_dirs).await?;
    let catalog = create_catalog(config, &remote.documents)?;

    info!(
        data_dir = %app_dirs.app_data_root.display(),
        remote = name_or_memory(&config.remote_provider),
        catalog = name_or_memory(&config.catalog_source),
        "dependencies wired"
    );

    Ok(AppDeps {
        auth: remote.auth,
        documents: remote.documents,
        catalog,
        user_data: Arc::new(UserDataService::new(
            seed::favourite_restaurants(),
            seed::cart_items(),
        )),
        login_state_store: preference_store(app_dirs, LOGIN_STATE_NAMESPACE),
        user_store: preference_store(app_dirs, USER_PREFS_NAMESPACE),
        onboarding_store: preference_store(app_dirs, ONBOARDING_NAMESPACE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_configured_data_dir_wins() {
        let config = AppConfig {
            data_dir: PathBuf::from("/srv/comtam"),
            ..AppConfig::empty()
        };

        let dirs = resolve_app_dirs(&config).unwrap();

        assert_eq!(dirs.preferences_dir(), PathBuf::from("/srv/comtam/prefs"));
    }

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let config = AppConfig {
            remote_provider: "carrier-pigeon".to_string(),
            ..AppConfig::empty()
        };
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/comtam"),
        };

        let err = wire_dependencies(&config, &dirs).await.err().unwrap();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[tokio::test]
    async fn test_firebase_without_project_is_rejected() {
        let config = AppConfig {
            remote_provider: "firebase".to_string(),
            ..AppConfig::empty()
        };
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/comtam"),
        };

        assert!(wire_dependencies(&config, &dirs).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_catalog_source_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig {
            catalog_source: "fax".to_string(),
            ..AppConfig::empty()
        };
        let dirs = AppDirs {
            app_data_root: temp_dir.path().to_path_buf(),
        };

        assert!(wire_dependencies(&config, &dirs).await.is_err());
    }

    #[tokio::test]
    async fn test_corrupted_local_users_file_fails_wiring() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dirs = AppDirs {
            app_data_root: temp_dir.path().to_path_buf(),
        };
        std::fs::create_dir_all(dirs.remote_dir()).unwrap();
        std::fs::write(dirs.remote_dir().join(LOCAL_USERS_FILE), "{not json").unwrap();

        let err = wire_dependencies(&AppConfig::empty(), &dirs)
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("Failed to open local users"));
    }
}
