use crate::domain::models::FileContentMap;
use log::debug;

const PREAMBLE: &str = "The following are the contents of all files in the target repository.\n\
Use them as a reference and modify the repository according to the instructions below.\n\n";

const SEPARATOR: &str = "----------\n";

const INSTRUCTIONS_HEADER: &str = "Instructions:\n";

/// Renders every collected file followed by the instructions. File content and
/// instructions are inserted verbatim, without escaping.
pub fn assemble_prompt(files: &FileContentMap, instructions: &str) -> String {
    let content_len: usize = files.values().map(String::len).sum();
    debug!(
        "Assembling prompt from {} files ({} bytes of content)",
        files.len(),
        content_len
    );

    let mut prompt = String::with_capacity(content_len + instructions.len() + 256);
    prompt.push_str(PREAMBLE);

    for (path, content) in files {
        prompt.push_str(SEPARATOR);
        prompt.push_str(&format!("[File]: {}\n[Content Start]\n", path.display()));
        prompt.push_str(content);
        prompt.push_str("\n[Content End]\n\n");
    }

    prompt.push_str(SEPARATOR);
    prompt.push_str(INSTRUCTIONS_HEADER);
    prompt.push_str(instructions);

    prompt
}
