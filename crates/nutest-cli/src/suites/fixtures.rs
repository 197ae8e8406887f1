use nutest::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A scratch file that exists for exactly one test
#[derive(Default)]
pub struct ScratchFile {
    path: Option<PathBuf>,
}

impl ScratchFile {
    fn read(&self) -> Result<String, FixtureError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| FixtureError::set_up("scratch file was never created"))?;
        Ok(fs::read_to_string(path)?)
    }
}

impl Fixture for ScratchFile {
    fn set_up(&mut self) -> Result<(), FixtureError> {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("nutest-demo-{}-{}.txt", process::id(), id));
        fs::write(&path, "seed\n")?;
        self.path = Some(path);
        Ok(())
    }

    fn tear_down(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = fs::remove_file(path);
        }
    }
}

/// A fixed stack of numbers
#[derive(Default)]
pub struct Stack {
    items: Vec<i32>,
}

impl Fixture for Stack {
    fn set_up(&mut self) -> Result<(), FixtureError> {
        self.items.extend([1, 2, 3]);
        Ok(())
    }
}

nutest::suite! {
    #[describe = "Set-up and tear-down around each test"]
    pub mod suite = "Fixtures";

    #[describe = "Set-up seeds the file"]
    fn scratch_is_seeded(scratch: &mut ScratchFile) {
        check!(scratch.path.as_ref().is_some_and(|path| path.exists()));
        // an unreadable file ends the test as errored
        scratch.read().map(drop)
    }

    fn scratch_holds_seed(scratch: &mut ScratchFile) {
        let contents = scratch.read().ok();
        check_eq!(contents.as_deref(), Some("seed\n"));
    }

    fn stack_pops(stack: &mut Stack) {
        check_eq!(stack.items.pop(), Some(3));
        check_eq!(stack.items.len(), 2);
    }

    #[describe = "Each test gets its own state"]
    fn stack_is_reset(stack: &mut Stack) {
        check_eq!(stack.items, vec![1, 2, 3]);
    }
}
