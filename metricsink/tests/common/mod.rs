use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Records every write as one batch. Can be told to fail upcoming writes.
#[derive(Clone, Default)]
pub struct RecordingOutput {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Default)]
struct Recording {
    batches: Vec<Vec<u8>>,
    attempts: usize,
    failures_left: usize,
}

impl RecordingOutput {
    pub fn fail_next(&self, writes: usize) {
        self.inner.lock().expect("recording lock").failures_left = writes;
    }

    pub fn batches(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("recording lock")
            .batches
            .iter()
            .map(|batch| String::from_utf8_lossy(batch).into_owned())
            .collect()
    }

    pub fn attempts(&self) -> usize {
        self.inner.lock().expect("recording lock").attempts
    }
}

impl Write for RecordingOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut recording = self.inner.lock().expect("recording lock");
        recording.attempts += 1;
        if recording.failures_left > 0 {
            recording.failures_left -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output went away"));
        }
        recording.batches.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
