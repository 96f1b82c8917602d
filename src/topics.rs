//! Topic list and duplicate-avoiding random selection.
//!
//! The topic pool is a fixed set of Korean CS subjects. Before each run the
//! posts directory is scanned for titles of previously generated posts so the
//! selector can avoid repeating a topic until the whole pool is exhausted.
//!
//! # Used-topic scan
//!
//! Only the first 500 bytes of each `.md` file are inspected; the front
//! matter always sits at the top of the file, so reading whole post bodies
//! would be wasted I/O. A file without a matching `title:` line is skipped.

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::IndexedRandom;
use regex::Regex;
use std::collections::HashSet;
use tokio::fs;
use tracing::{debug, instrument, warn};

/// The fixed topic pool. Immutable; passed explicitly into the selector so
/// tests can substitute their own list.
pub const TOPICS: &[&str] = &[
    "변수와 자료형",
    "조건문과 반복문",
    "배열과 리스트의 차이",
    "함수란 무엇인가",
    "객체지향 프로그래밍 기초",
    "HTTP와 HTTPS의 차이",
    "쿠키와 세션",
    "GET과 POST의 차이",
    "JSON이란",
    "API란 무엇인가",
    "Git 기본 명령어",
    "프론트엔드와 백엔드",
    "데이터베이스란",
    "SQL 기본 문법",
    "클라이언트와 서버",
    "TCP와 UDP의 차이",
    "프로세스와 스레드",
    "스택과 큐 자료구조",
    "해시 테이블 원리",
    "이진 탐색 알고리즘",
    "시간복잡도 Big-O 표기법",
    "REST API 설계 원칙",
    "데이터베이스 인덱스",
    "정규화와 비정규화",
    "캐시의 원리",
    "동기와 비동기 처리",
    "SOLID 원칙",
    "디자인 패턴 - 싱글톤",
    "디자인 패턴 - 팩토리",
    "OAuth 인증 방식",
    "운영체제 스케줄링 알고리즘",
    "가상 메모리와 페이징",
    "데드락과 해결 방법",
    "트랜잭션 격리 수준",
    "CAP 정리",
    "분산 시스템의 일관성",
    "마이크로서비스 아키텍처",
    "메시지 큐와 이벤트 드리븐",
    "Docker 컨테이너 원리",
    "Kubernetes 기본 개념",
    "CI/CD 파이프라인",
    "로드 밸런싱 전략",
    "데이터베이스 샤딩",
    "동시성 제어와 락",
    "가비지 컬렉션 원리",
];

/// How many leading bytes of a post file are inspected for the title line.
const FRONT_MATTER_WINDOW: usize = 500;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"title:\s*"\[Deep Dive\]\s*(.*?)"\s*"#).unwrap());

/// Pick one topic uniformly at random, excluding topics already used.
///
/// `used` holds lower-cased topic strings from prior posts. If every topic
/// in the pool has been used, the exclusion is ignored and the pick is made
/// from the full pool again (the used-set is not cleared on disk).
///
/// Returns `None` only for an empty topic list.
pub fn select_topic<'a, R: Rng + ?Sized>(
    topics: &[&'a str],
    used: &HashSet<String>,
    rng: &mut R,
) -> Option<&'a str> {
    let fresh: Vec<&str> = topics
        .iter()
        .copied()
        .filter(|t| !used.contains(&t.to_lowercase()))
        .collect();

    if fresh.is_empty() {
        debug!(pool = topics.len(), "All topics used; resetting to full pool");
        topics.choose(rng).copied()
    } else {
        debug!(fresh = fresh.len(), pool = topics.len(), "Selecting from unused topics");
        fresh.choose(rng).copied()
    }
}

/// Extract a lower-cased topic from the head of a post file.
///
/// Matches the `title: "[Deep Dive] <topic>"` front-matter line.
pub(crate) fn extract_used_topic(head: &str) -> Option<String> {
    TITLE_RE
        .captures(head)
        .map(|caps| caps[1].trim().to_lowercase())
}

/// Scan the posts directory and collect the lower-cased topics of existing
/// posts.
///
/// A missing directory yields an empty set (first run). Files that cannot be
/// read, or whose front matter does not match the expected title pattern,
/// are skipped with a warning. The set is rebuilt from scratch on every run;
/// nothing is cached between invocations.
#[instrument(level = "info", skip_all, fields(posts_dir = %posts_dir))]
pub async fn scan_used_topics(posts_dir: &str) -> HashSet<String> {
    let mut used = HashSet::new();

    let mut entries = match fs::read_dir(posts_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!(error = %e, "Posts directory not readable; assuming no prior posts");
            return used;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed reading directory entry; stopping scan");
                break;
            }
        };

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read post; skipping");
                continue;
            }
        };

        let head_len = bytes.len().min(FRONT_MATTER_WINDOW);
        let head = String::from_utf8_lossy(&bytes[..head_len]);
        if let Some(topic) = extract_used_topic(&head) {
            debug!(path = %path.display(), %topic, "Found prior topic");
            used.insert(topic);
        }
    }

    debug!(count = used.len(), "Used-topic scan complete");
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs as stdfs;

    #[test]
    fn test_select_topic_avoids_used() {
        let topics = &["alpha", "beta", "gamma"];
        let mut used = HashSet::new();
        used.insert("alpha".to_string());
        used.insert("gamma".to_string());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(select_topic(topics, &used, &mut rng), Some("beta"));
        }
    }

    #[test]
    fn test_select_topic_resets_when_all_used() {
        let topics = &["alpha", "beta"];
        let used: HashSet<String> =
            topics.iter().map(|t| t.to_lowercase()).collect();

        let mut rng = StdRng::seed_from_u64(42);
        let picked = select_topic(topics, &used, &mut rng);
        assert!(picked.is_some());
        assert!(topics.contains(&picked.unwrap()));
    }

    #[test]
    fn test_select_topic_used_comparison_is_case_insensitive() {
        let topics = &["HTTP와 HTTPS의 차이", "쿠키와 세션"];
        let mut used = HashSet::new();
        used.insert("http와 https의 차이".to_string());

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_topic(topics, &used, &mut rng), Some("쿠키와 세션"));
    }

    #[test]
    fn test_select_topic_empty_list() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_topic(&[], &HashSet::new(), &mut rng), None);
    }

    #[test]
    fn test_extract_used_topic() {
        let head = "---\ntitle: \"[Deep Dive] CORS 동작 원리\"\ndate: 2024-01-01 09:00:00 +0900\n---\n";
        assert_eq!(
            extract_used_topic(head),
            Some("cors 동작 원리".to_string())
        );
    }

    #[test]
    fn test_extract_used_topic_no_match() {
        assert_eq!(extract_used_topic("# Just a heading\n"), None);
        assert_eq!(extract_used_topic("title: \"Unrelated post\"\n"), None);
    }

    #[tokio::test]
    async fn test_scan_used_topics_missing_dir() {
        let used = scan_used_topics("/definitely/not/a/real/dir").await;
        assert!(used.is_empty());
    }

    #[tokio::test]
    async fn test_scan_used_topics_reads_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        let post = "---\ntitle: \"[Deep Dive] CORS 동작 원리\"\ndate: 2024-01-01 09:00:00 +0900\ncategories: [개발지식]\ntags: [CS, 심화]\n---\n\n본문입니다.\n";
        stdfs::write(dir.path().join("2024-01-01-cors-동작-원리.md"), post).unwrap();
        stdfs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        stdfs::write(dir.path().join("draft.md"), "no front matter here").unwrap();

        let used = scan_used_topics(dir.path().to_str().unwrap()).await;
        assert_eq!(used.len(), 1);
        assert!(used.contains("cors 동작 원리"));
    }

    #[tokio::test]
    async fn test_scan_used_topics_only_reads_head() {
        let dir = tempfile::tempdir().unwrap();
        // Title buried past the 500-byte window must not be picked up.
        let mut post = String::new();
        post.push_str(&"x".repeat(600));
        post.push_str("\ntitle: \"[Deep Dive] 숨겨진 주제\"\n");
        stdfs::write(dir.path().join("2024-01-02-buried.md"), post).unwrap();

        let used = scan_used_topics(dir.path().to_str().unwrap()).await;
        assert!(used.is_empty());
    }
}
