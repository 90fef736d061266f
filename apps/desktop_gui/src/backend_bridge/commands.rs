//! Backend commands queued from UI to the backend worker.

use catalog::protocol::RunRequest;

pub enum BackendCommand {
    SubmitRun {
        server_url: String,
        request: RunRequest,
    },
    ProbeServer {
        server_url: String,
    },
}
