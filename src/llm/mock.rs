//! Offline generator used for tests and `MOCK_LLM=1` runs.

use crate::edit::prompts;
use crate::llm::Generator;
use anyhow::Result;

/// Deterministic stand-in for the real generator.
///
/// Plan prompts get an entry-only plan; generation prompts get the target's
/// current content with a `// [MOCK_AI_EDIT]` marker line appended, mirroring
/// what a real model is instructed to return.
#[derive(Debug, Default)]
pub struct MockGenerator;

impl Generator for MockGenerator {
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        if system_prompt == prompts::PLAN_SYSTEM {
            let entry = field(user_prompt, "Entry file: ").unwrap_or("unknown");
            return Ok(serde_json::json!({
                "files": [{"path": entry, "reason": "mock plan: entry file only"}],
                "notes": "mock plan",
            })
            .to_string());
        }

        let instruction = field(user_prompt, "Instruction: ").unwrap_or("");
        let before = between(user_prompt, prompts::CONTENT_BEGIN, prompts::CONTENT_END)
            .unwrap_or("")
            .trim_start_matches('\n');
        Ok(format!(
            "{}\n// [MOCK_AI_EDIT] {}\n",
            before.trim_end_matches('\n'),
            instruction
        ))
    }
}

fn field<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    Some(rest.split('\n').next().unwrap_or(rest).trim())
}

fn between<'a>(text: &'a str, begin: &str, end: &str) -> Option<&'a str> {
    let start = text.find(begin)? + begin.len();
    let stop = text[start..].rfind(end)? + start;
    Some(&text[start..stop])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_prompt_gets_entry_only_plan() {
        let user = "Instruction: do it\nEntry file: src/a.ts\nCandidate files:\n- src/a.ts";
        let out = MockGenerator.complete(prompts::PLAN_SYSTEM, user).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["files"][0]["path"], "src/a.ts");
    }

    #[test]
    fn generation_prompt_appends_marker() {
        let user = format!(
            "Instruction: add logging\nTarget file: a.ts\n{}\nconst x = 1;\n{}",
            prompts::CONTENT_BEGIN,
            prompts::CONTENT_END
        );
        let out = MockGenerator.complete(prompts::GENERATE_SYSTEM, &user).unwrap();
        assert_eq!(out, "const x = 1;\n// [MOCK_AI_EDIT] add logging\n");
    }
}
