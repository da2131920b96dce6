use crate::models::interview::AssessmentResult;

const SYSTEM_LABEL: &str = "AI Interview Simulator v3.0";

/// Renders the downloadable markdown report.
pub fn render_markdown(result: &AssessmentResult) -> String {
    let job = &result.job_details;
    format!(
        "# AI Interview Assessment Report\n\
         \n\
         ## Interview Overview\n\
         **Generated:** {timestamp}\n\
         **System:** {system}\n\
         \n\
         **Candidate:** {name}\n\
         **Position:** {position}\n\
         **Company:** {company}\n\
         **Department:** {department}\n\
         **Required Skills:** {tech_stack}\n\
         \n\
         ---\n\
         \n\
         ## Comprehensive Assessment\n\
         \n\
         {assessment}\n\
         \n\
         ---\n\
         \n\
         *Report generated by AI Interview Simulator Multi-Agent System*\n",
        timestamp = result.timestamp,
        system = SYSTEM_LABEL,
        name = result.candidate_info.name,
        position = job.position,
        company = job.company,
        department = job.department,
        tech_stack = job.tech_stack,
        assessment = result.assessment,
    )
}
