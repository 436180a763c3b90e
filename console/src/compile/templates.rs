//! Constant templates for the generated workload definition
//!
//! The job template and the two embedded shell scripts are opaque text with
//! `%NAME%` placeholders. The scripts are never interpreted by the console;
//! they only reference environment variables that the scheduler resolves at
//! task runtime, so `${...}` occurrences below are literal output.

/// The full workload definition skeleton
pub const JOB_TEMPLATE: &str = r#"job "%OP_TYPE%@%MODULE_NAME%" {
  datacenters = ["%MODULE_NAME%"]
  type        = "service"

  update {
    max_parallel      = 1
    min_healthy_time  = "5m"
    healthy_deadline  = "15m"
    progress_deadline = "16m"
    auto_revert       = false
    canary            = 0
  }

  group "%OP_TYPE%" {
    max_client_disconnect = "2h"
    count                 = %MODEL_COUNT%

    restart {
      attempts = 1
      interval = "30m"
      delay    = "15s"
      mode     = "fail"
    }
%CONSTRAINT%
    task "%OP_TYPE%" {
      env {
        GRAPHFLOW_OP_TYPE       = "${NOMAD_GROUP_NAME}"
        MODEL_DIR_ID            = "/home/qspace/model/${NOMAD_GROUP_NAME}_${NOMAD_SHORT_ALLOC_ID}"
        ARTIFACT_SERVER_ADDR    = "http://localhost:1087"
        MODEL_COS_PATH          = "%MODEL_PATH%"
        MODEL_MD5               = "%MODEL_MD5%"
        GRAPHFLOW_MODEL_N_FETCH = %PREFETCH%
        GRAPHFLOW_CONCURRENCY   = %MODEL_CONCURRENCY%
        LOGIC_WORKER_PER_DAEMON = %LOGIC_WORKER_NUM%
        %EXTRA_ENV%
      }

      driver = "raw_exec"
      config {
        command = "/bin/sh"
        args    = [
          "-c",
          "chmod a+x local/start.sh && exec local/start.sh"
        ]
      }

      template {
        data        = <<EOF
%START_SCRIPT%
EOF
        destination = "local/start.sh"
      }

      kill_timeout = "25s"
    }

    task "clean" {
      lifecycle {
        hook = "poststop"
      }

      env {
        MODEL_DIR_ID         = "/home/qspace/model/${NOMAD_GROUP_NAME}_${NOMAD_SHORT_ALLOC_ID}"
        ARTIFACT_SERVER_ADDR = "http://localhost:1087"
        MODEL_COS_PATH       = "%MODEL_PATH%"
        MODEL_MD5            = "%MODEL_MD5%"
      }

      driver = "raw_exec"
      config {
        command = "/bin/sh"
        args    = [
          "-c",
          "chmod a+x local/clean.sh && exec local/clean.sh"
        ]
      }

      template {
        data        = <<EOF
%CLEAN_SCRIPT%
EOF
        destination = "local/clean.sh"
      }
    }
  }
}
"#;

/// Placement constraint emitted only when a deploy IP was entered
pub const CONSTRAINT_FRAGMENT: &str = r#"
    constraint {
      attribute = "${attr.unique.network.ip-address}"
      operator  = "set_contains_any"
      value     = "%DEPLOY_IP%"
    }"#;

/// Fetch-and-exec script for the run task: pull the artifact from the
/// artifact server, then hand control to the model's own entry point
pub const START_SCRIPT: &str = r#"#!/bin/bash
filedir=$(curl --request POST ''${ARTIFACT_SERVER_ADDR}'/artifacts?path='${MODEL_COS_PATH}'&md5='${MODEL_MD5}'')
echo ${filedir}
mkdir -p ${MODEL_DIR_ID}
cd ${MODEL_DIR_ID} && chmod a+x ${filedir}/main.sh && exec ${filedir}/main.sh"#;

/// Cleanup script for the poststop task: release the artifact, prune the
/// artifact server cache, remove the model directory
pub const CLEAN_SCRIPT: &str = r#"#!/bin/bash
curl --request DELETE ${ARTIFACT_SERVER_ADDR}'/artifacts?path='${MODEL_COS_PATH}'&md5='${MODEL_MD5} -w '\n'
curl --request POST ${ARTIFACT_SERVER_ADDR}'/artifacts/_prune' -w '\n'
rm -rf ${MODEL_DIR_ID}
echo clean done"#;
