//! 참조 URL 결합 -- 저장소 해석과 커밋 추출을 한 번에 수행
//!
//! 참조 하나의 실패는 전체 처리를 중단시키지 않습니다.
//! 해석이나 추출 중 하나라도 실패하면 해당 참조는 조용히 건너뜁니다.

use tracing::debug;

use crate::commit::commit;
use crate::repo::RepoResolver;
use crate::types::GitCommit;

/// 주어진 해석기로 참조 URL에서 [`GitCommit`]을 추출합니다.
///
/// 저장소 해석 또는 커밋 추출이 실패하면 `None`을 반환합니다.
pub fn extract_git_commit_with(resolver: &RepoResolver, url: &str) -> Option<GitCommit> {
    let repo = match resolver.resolve(url) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(url, error = %e, "skipping reference: no repository");
            return None;
        }
    };

    let commit = match commit(url) {
        Ok(commit) => commit,
        Err(e) => {
            debug!(url, error = %e, "skipping reference: no commit");
            return None;
        }
    };

    Some(GitCommit { repo, commit })
}

/// 내장 거부 목록으로 참조 URL에서 [`GitCommit`]을 추출합니다.
///
/// # 예시
///
/// ```
/// use ironcve_normalizer::extract_git_commit;
///
/// let c = extract_git_commit(
///     "https://github.com/MariaDB/server/commit/b1351c15946349f9daa7e5297fb2ac6f3139e4a8",
/// )
/// .unwrap();
/// assert_eq!(c.repo, "https://github.com/MariaDB/server");
///
/// assert!(extract_git_commit("https://github.com/MariaDB/server/pull/1").is_none());
/// ```
pub fn extract_git_commit(url: &str) -> Option<GitCommit> {
    extract_git_commit_with(&RepoResolver::new(), url)
}

/// 참조 URL 목록에서 추출 가능한 커밋을 순서대로 모읍니다.
pub fn extract_git_commits<'a, I>(resolver: &RepoResolver, urls: I) -> Vec<GitCommit>
where
    I: IntoIterator<Item = &'a str>,
{
    urls.into_iter()
        .filter_map(|url| extract_git_commit_with(resolver, url))
        .collect()
}
