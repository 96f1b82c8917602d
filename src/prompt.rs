//! Prompt construction for the deep-dive post generator.
//!
//! The prompt is a fixed Korean template with the topic interpolated; the
//! same input always produces the same prompt. The system instruction pins
//! the model's role and output language so the response stays in Korean
//! markdown.

/// System instruction sent alongside every request.
pub const SYSTEM_INSTRUCTION: &str = "당신은 깊이 있는 CS 지식을 전달하는 기술 블로거입니다. \
모든 답변은 한국어로 작성하고, 중국어나 일본어 문자를 절대 사용하지 마세요. \
마크다운 형식으로만 답변하세요.";

/// Build the generation prompt for a topic.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "다음 주제에 대해 깊이 있는 블로그 포스트를 작성해주세요.\n\
         \n\
         주제: {topic}\n\
         \n\
         다음 형식으로 작성해주세요:\n\
         1. 핵심 개념을 쉽게 설명 (비유 사용 권장)\n\
         2. 내부 동작 원리를 단계별로 설명\n\
         3. 실제 사용 예시나 코드 예제\n\
         4. 면접에서 자주 나오는 질문과 답변\n\
         5. 한 줄 요약\n\
         \n\
         작성 규칙:\n\
         - 한국어로 작성\n\
         - 마크다운 형식 사용\n\
         - 코드 블록은 적절한 언어 태그 사용\n\
         - 다이어그램이 필요하면 ASCII 아트 사용\n\
         - 이모지는 최소한으로 사용\n\
         - 전체 길이는 800~1200자 정도"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_is_deterministic() {
        let a = build_prompt("캐시의 원리");
        let b = build_prompt("캐시의 원리");
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_prompt_contains_topic() {
        let prompt = build_prompt("TCP와 UDP의 차이");
        assert!(prompt.contains("주제: TCP와 UDP의 차이"));
        assert!(prompt.contains("마크다운"));
    }
}
