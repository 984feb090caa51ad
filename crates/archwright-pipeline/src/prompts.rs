//! Instruction payloads sent to the generation service.

use archwright_core::Architecture;

use crate::error::GenerationError;

/// Architecture analysis. The requirements are embedded verbatim.
pub fn analysis_prompt(requirements: &str) -> String {
    format!(
        r#"You are an Azure cloud solutions architect. Read the project requirements below and recommend a complete Azure infrastructure for them.

PROJECT REQUIREMENTS:
{requirements}

Respond with a single JSON object in exactly this shape:
{{
  "summary": "Two or three sentences summarising the project",
  "architecture": {{
    "core_services": ["Azure service name", "Azure service name"],
    "compute": "recommended compute option",
    "storage": "recommended storage option",
    "networking": "networking approach",
    "security": "security measures"
  }},
  "cost_estimate": {{
    "monthly_range": "$X - $Y USD",
    "breakdown": ["item: $X", "item: $Y"]
  }},
  "deployment_steps": ["first step", "second step", "third step"],
  "considerations": ["consideration", "consideration"]
}}

Output ONLY the JSON object. Do not wrap it in markdown or code fences and do not add any explanation before or after it."#
    )
}

/// Mermaid flowchart for an existing architecture.
pub fn diagram_prompt(arch: &Architecture) -> Result<String, GenerationError> {
    let context = serde_json::to_string_pretty(arch)?;
    Ok(format!(
        r#"You are an Azure architect. Draw a Mermaid flowchart of the following architecture:

{context}

The flowchart must:
- begin with "graph TB" (top to bottom)
- start from the users or clients
- include every core Azure service
- connect services with arrows, labelled with the data that flows between them
- use clear Azure service names

Rules:
- standard Mermaid syntax only: node declarations like A[Label], edges like A --> B or A -->|label| B
- one statement per line
- no styling, no classes, no subgraphs
- one box per service

Example:
graph TB
    A[Users] --> B[Azure Front Door]
    B -->|HTTPS| C[Azure App Service]
    C -->|SQL| D[Azure SQL Database]

Output ONLY the Mermaid code, starting with "graph TB". No explanation and no code fences."#
    ))
}

/// Terraform for an existing architecture.
pub fn infrastructure_prompt(arch: &Architecture) -> Result<String, GenerationError> {
    let context = serde_json::to_string_pretty(arch)?;
    Ok(format!(
        r#"You are an Azure DevOps engineer. Write Terraform for the following architecture:

{context}

The Terraform must include:
- the azurerm provider configuration
- a resource group
- every core service listed above
- the networking components
- the security configuration
- input variables and outputs

Output ONLY the Terraform code. No explanation and no markdown formatting."#
    ))
}

/// Follow-up question about an existing architecture.
pub fn question_prompt(arch: &Architecture, question: &str) -> Result<String, GenerationError> {
    let context = serde_json::to_string_pretty(arch)?;
    Ok(format!(
        r#"You are an Azure cloud solutions architect.

PREVIOUS RECOMMENDATION:
{context}

USER QUESTION:
{question}

Answer clearly and concisely, following Azure best practices. Stay under 300 words."#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_architecture;

    #[test]
    fn analysis_prompt_embeds_requirements_verbatim() {
        let requirements = "  video platform,\n  10k users  ";
        let prompt = analysis_prompt(requirements);
        assert!(prompt.contains(requirements));
        assert!(prompt.contains("\"core_services\""));
        assert!(prompt.contains("Output ONLY the JSON object"));
    }

    #[test]
    fn artifact_prompts_embed_architecture() {
        let arch = sample_architecture();
        for prompt in [
            diagram_prompt(&arch).unwrap(),
            infrastructure_prompt(&arch).unwrap(),
            question_prompt(&arch, "How do I scale?").unwrap(),
        ] {
            assert!(prompt.contains("Azure App Service"));
            assert!(prompt.contains(&arch.summary));
        }
    }

    #[test]
    fn diagram_prompt_requests_top_to_bottom_graph() {
        let prompt = diagram_prompt(&sample_architecture()).unwrap();
        assert!(prompt.contains("graph TB"));
        assert!(prompt.contains("no subgraphs"));
    }

    #[test]
    fn question_prompt_carries_question() {
        let prompt = question_prompt(&sample_architecture(), "What about DR?").unwrap();
        assert!(prompt.contains("USER QUESTION:\nWhat about DR?"));
    }
}
