/// Skill categorization prompt.
///
/// The response is normalized against the input list afterwards, so the
/// model cannot add or drop skills.
pub fn categorize_skills_prompt(skills: &[String]) -> String {
    let list = skills
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Group the following résumé skills into categories for a two-column skills table.\n\
\n\
Use these category names where they fit: Frontend, Backend, DevOps, Cloud, Data, Mobile, \
Testing, Databases, Languages, Frameworks, Tools. Put anything that fits none of them in Other.\n\
\n\
Rules:\n\
- Use every skill exactly as written, once per occurrence in the list.\n\
- Do not add, rename, merge or translate skills.\n\
- Omit empty categories.\n\
\n\
Skills:\n\
{list}\n\
\n\
Respond with a JSON object of the form:\n\
{{\"categories\": {{\"<Category>\": [\"<skill>\", ...]}}}}"
    )
}
