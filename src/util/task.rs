use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Keyed registry of background tasks owned by the UI loop.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Registers `task` under `key`. A finished task under the same key is
    /// simply replaced; one still running is aborted.
    pub fn spawn(&mut self, key: &str, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key.to_string(), task) {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.tasks.get(key).is_some_and(|h| !h.is_finished())
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn replacing_a_running_task_aborts_it() {
        let mut tasks = TaskManager::new();
        let first = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        let first_abort = first.abort_handle();
        tasks.spawn("search", first);
        tasks.spawn("search", tokio::spawn(async {}));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(first_abort.is_finished());
    }

    #[tokio::test]
    async fn abort_all_clears_registry() {
        let mut tasks = TaskManager::new();
        tasks.spawn(
            "a",
            tokio::spawn(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }),
        );
        assert!(tasks.is_running("a"));
        tasks.abort_all();
        assert!(!tasks.is_running("a"));
    }
}
