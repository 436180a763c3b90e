//! Workload-definition compiler
//!
//! Renders a validated deployment request into the full workload-definition
//! text. Pure and deterministic: identical input produces byte-identical
//! output, no I/O, no failure path. Required-field validation happens on
//! the intake screen, so the compiler assumes its input is validated.

pub mod templates;

use crate::models::request::DeploymentRequest;

/// Indentation of the entries inside the run task's env block; extra env
/// lines are joined so that every line carries this exact indent
const EXTRA_ENV_INDENT: &str = "        ";

/// Render the workload definition for a deployment request
pub fn compile(request: &DeploymentRequest) -> String {
    let extra_env = expand_extra_env(&request.extra_env);
    let constraint = constraint_fragment(&request.deploy_ip);

    templates::JOB_TEMPLATE
        .replace("%START_SCRIPT%", templates::START_SCRIPT)
        .replace("%CLEAN_SCRIPT%", templates::CLEAN_SCRIPT)
        .replace("%CONSTRAINT%", &constraint)
        .replace("%EXTRA_ENV%", &extra_env)
        .replace("%OP_TYPE%", &request.op_type)
        .replace("%MODULE_NAME%", &request.module_name)
        .replace("%MODEL_COUNT%", &request.model_count)
        .replace("%MODEL_PATH%", &request.model_path)
        .replace("%MODEL_MD5%", &request.model_md5)
        .replace("%PREFETCH%", &request.prefetch)
        .replace("%MODEL_CONCURRENCY%", &request.model_concurrency)
        .replace("%LOGIC_WORKER_NUM%", &request.samosa_logic_worker_num)
}

/// Expand the comma-separated extra env list into identically indented
/// lines, in input order
///
/// Splitting the empty string yields one empty token, so an empty
/// `extra_env` still emits a single blank env line.
fn expand_extra_env(extra_env: &str) -> String {
    let separator = format!("\n{}", EXTRA_ENV_INDENT);
    extra_env.split(',').collect::<Vec<_>>().join(&separator)
}

/// Emit the placement constraint when a deploy IP was entered; the empty
/// string otherwise
fn constraint_fragment(deploy_ip: &str) -> String {
    if deploy_ip.is_empty() {
        return String::new();
    }
    templates::CONSTRAINT_FRAGMENT.replace("%DEPLOY_IP%", deploy_ip)
}
