use regex::Regex;

pub fn strip_code_fences(input: &str) -> String {
  let opening = Regex::new(r"^```[A-Za-z]*\s*").expect("regex");
  let closing = Regex::new(r"```\s*$").expect("regex");
  let trimmed = input.trim();
  let without_open = opening.replace(trimmed, "");
  closing.replace(&without_open, "").trim().to_string()
}
