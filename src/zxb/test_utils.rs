use crate::api::ZxbApi;
use crate::commands::CmdContext;
use crate::config::{ZxbConfig, ZxbPaths};
use crate::error::{Result, ZxbError};
use crate::model::script_template;
use crate::prompt::Prompter;
use crate::remote::{FetchResponse, Fetcher};
use crate::shell::{ProcessOutput, Shell};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A tool home plus source directories inside a temp dir.
pub struct TestEnv {
    // Kept so the directory lives as long as the env
    pub _temp_dir: TempDir,
    pub config: ZxbConfig,
    pub paths: ZxbPaths,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_sources(1)
    }

    pub fn with_sources(count: usize) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let paths = ZxbPaths::new(root.join("home"));
        let sources: Vec<PathBuf> = (0..count).map(|i| root.join(format!("src{}", i))).collect();
        for dir in &sources {
            fs::create_dir_all(dir).expect("failed to create source dir");
        }
        let config = ZxbConfig {
            sources,
            ..Default::default()
        };
        Self {
            _temp_dir: temp_dir,
            config,
            paths,
            root,
        }
    }

    /// Writes `<slug>.mjs` into the source directory at `index`.
    pub fn write_script(&self, index: usize, slug: &str) -> PathBuf {
        let file = self.config.sources[index].join(format!("{}.mjs", slug));
        fs::write(&file, script_template()).expect("failed to write script");
        file
    }

    /// Writes a plain file into the bin directory.
    pub fn write_bin(&self, name: &str) -> PathBuf {
        fs::create_dir_all(&self.paths.bin).expect("failed to create bin dir");
        let bin = self.paths.bin.join(name);
        fs::write(&bin, "#!/bin/sh\n").expect("failed to write bin");
        bin
    }

    /// Borrows the env as a command context backed by the given doubles.
    pub fn context<'a>(
        &'a mut self,
        shell: &'a FakeShell,
        prompt: &'a ScriptedPrompter,
        fetcher: &'a FakeFetcher,
    ) -> CmdContext<'a> {
        CmdContext {
            config: &mut self.config,
            paths: &self.paths,
            shell,
            prompt,
            fetcher,
        }
    }

    pub fn api(
        &self,
        shell: FakeShell,
        prompt: ScriptedPrompter,
        fetcher: FakeFetcher,
    ) -> ZxbApi<FakeShell, ScriptedPrompter, FakeFetcher> {
        ZxbApi::new(self.config.clone(), self.paths.clone(), shell, prompt, fetcher)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

/// Records commands instead of running them.
#[derive(Debug, Default)]
pub struct FakeShell {
    pub interactive: RefCell<Vec<RecordedCall>>,
    pub captured: RefCell<Vec<RecordedCall>>,
    pub on_path: HashMap<String, PathBuf>,
    pub interactive_code: Option<i32>,
    pub capture_output: Option<ProcessOutput>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self {
            interactive_code: Some(0),
            ..Default::default()
        }
    }

    pub fn with_command_on_path(mut self, name: &str, path: &str) -> Self {
        self.on_path.insert(name.to_string(), PathBuf::from(path));
        self
    }

    pub fn failing_editor(mut self) -> Self {
        self.interactive_code = Some(1);
        self
    }

    pub fn with_capture_output(mut self, output: ProcessOutput) -> Self {
        self.capture_output = Some(output);
        self
    }

    /// Last path handed to the editor.
    pub fn last_opened(&self) -> Option<PathBuf> {
        self.interactive
            .borrow()
            .last()
            .and_then(|call| call.args.last())
            .map(PathBuf::from)
    }
}

impl Shell for FakeShell {
    fn run_interactive(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<Option<i32>> {
        self.interactive.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
        });
        Ok(self.interactive_code)
    }

    fn run_capture(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput> {
        self.captured.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
        });
        Ok(self.capture_output.clone().unwrap_or(ProcessOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }))
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.on_path.get(program).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Confirm(bool),
    Select(Option<usize>),
}

/// Replays canned answers. Once they run out, confirmations take their default
/// and selections pick nothing.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            questions: RefCell::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        self.questions.borrow_mut().push(question.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Confirm(answer)) => Ok(answer),
            Some(other) => Err(ZxbError::Validation(format!(
                "expected a confirmation for {:?}, got {:?}",
                question, other
            ))),
            None => Ok(default),
        }
    }

    fn select(&self, question: &str, _options: &[String]) -> Result<Option<usize>> {
        self.questions.borrow_mut().push(question.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(Answer::Select(choice)) => Ok(choice),
            Some(other) => Err(ZxbError::Validation(format!(
                "expected a selection for {:?}, got {:?}",
                question, other
            ))),
            None => Ok(None),
        }
    }
}

/// Serves canned responses per URL; unknown URLs get a 404.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FetchResponse>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            FetchResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }
}

impl Fetcher for FakeFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        self.requested.borrow_mut().push(url.to_string());
        Ok(self.responses.get(url).cloned().unwrap_or(FetchResponse {
            status: 404,
            body: String::new(),
        }))
    }
}
