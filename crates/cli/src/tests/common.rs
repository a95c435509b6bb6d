use std::fs;
use std::path::Path;

use acl::{Acl, encode};

pub(super) const SVC: &str = "Spooler";

pub(super) fn run_with_args<I, S>(args: I) -> (i32, Vec<u8>, Vec<u8>)
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = super::run(args, &mut stdout, &mut stderr);
    (code, stdout, stderr)
}

pub(super) fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("valid UTF-8")
}

pub(super) fn store(dir: &Path, object: &str, acl: &Acl) {
    fs::write(dir.join(format!("{object}.dacl")), encode(acl).unwrap()).unwrap();
}

pub(super) fn load(dir: &Path, object: &str) -> Acl {
    acl::decode(&fs::read(dir.join(format!("{object}.dacl"))).unwrap()).unwrap()
}

pub(super) fn sid(text: &str) -> acl::Sid {
    text.parse().unwrap()
}
