use crate::error::{AppError, AppResult};
use crate::models::question::QuestionSet;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载一组题目
pub async fn load_toml_to_question_set(toml_file_path: &Path) -> AppResult<QuestionSet> {
    let path_str = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let set: QuestionSet =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;

    Ok(set.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有 TOML 文件
///
/// 单个文件加载失败只记录警告，不影响其他文件；结果按文件路径排序
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<QuestionSet>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::directory_not_found(folder_path).into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut question_sets = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_question_set(&path).await {
            Ok(set) => {
                tracing::info!("成功加载 {} 个题目", set.questions.len());
                question_sets.push(set);
            }
            Err(e) => {
                tracing::warn!("加载文件失败: {}", e);
            }
        }
    }

    Ok(question_sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_folder(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_all_toml_files_skips_broken_files() {
        let dir = temp_folder("toml_loader_skip");
        std::fs::write(
            dir.join("a_2023.toml"),
            "[[questions]]\nid = 1\nfilename = \"2023.pdf\"\nquestion_number = 1\nquestion_text = \"1 A\"\nanswer_text = 1\n",
        )
        .unwrap();
        std::fs::write(dir.join("b_broken.toml"), "[[questions]\nid =").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let sets = load_all_toml_files(dir.to_str().unwrap()).await.unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].questions.len(), 1);
        assert_eq!(sets[0].display_name(), "a_2023.toml");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_folder_is_an_error() {
        let err = load_all_toml_files("/definitely/not/here/questions")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::File(crate::error::FileError::DirectoryNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_broken_toml_reports_path() {
        let dir = temp_folder("toml_loader_broken");
        let path = dir.join("broken.toml");
        std::fs::write(&path, "questions = 3").unwrap();

        let err = load_toml_to_question_set(&path).await.unwrap_err();
        assert!(err.to_string().contains("broken.toml"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
