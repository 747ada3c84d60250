//! The `os` object: files, directories, environment, arguments and exit.

use hostlib_help::CapabilityRegistry;
use hostlib_sys::proc::Args;
use hostlib_sys::{env, fs, proc};
use rhai::{Array, Dynamic, INT};

use super::{document, error_object};
use crate::vm::ScriptVm;

/// The script-visible `os` object.
#[derive(Debug, Clone)]
pub struct OsObject {
    args: Args,
}

impl OsObject {
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

const HELP: &[(&str, &[&str], &str)] = &[
    (
        "args",
        &[],
        "Returns the command line arguments left over after the host parsed its own flags.",
    ),
    (
        "exit",
        &["exitCode int", "msg string"],
        "Stops the program with the numeric exit code given (e.g. 0 if everything is OK). The optional message is logged first.",
    ),
    (
        "getEnv",
        &["envvar string"],
        "Returns the value of an environment variable, or an empty string. (e.g. os.getEnv(\"HOME\"))",
    ),
    (
        "setEnv",
        &["envvar string", "value string"],
        "Sets an environment variable for this session and returns the value set. (e.g. os.setEnv(\"Welcome\", \"Hi there\"))",
    ),
    (
        "readFile",
        &["filepath string"],
        "Reads the file and returns its contents as a string.",
    ),
    (
        "writeFile",
        &["filepath string", "content string"],
        "Writes content to the file, replacing what was there, and returns the content.",
    ),
    ("rename", &["oldpath string", "newpath string"], "Renames oldpath to newpath."),
    (
        "remove",
        &["filepath string"],
        "Removes a file. Returns false and does nothing if filepath is a directory.",
    ),
    (
        "chmod",
        &["filepath string", "perms int"],
        "Sets the permissions of a file (e.g. 0o775, 0o664).",
    ),
    (
        "find",
        &["startpath string"],
        "Returns every path under startpath, startpath included, in lexical walk order.",
    ),
    (
        "mkdir",
        &["pathname string", "perms int"],
        "Makes a directory with the given permissions (e.g. 0o775).",
    ),
    (
        "mkdirAll",
        &["pathname string", "perms int"],
        "Makes a directory and any missing parents, like mkdir -p.",
    ),
    (
        "rmdir",
        &["pathname string"],
        "Removes an empty directory. Returns false and does nothing if pathname is not a directory.",
    ),
    (
        "rmdirAll",
        &["pathname string"],
        "Removes a directory and everything in it. Returns false and does nothing if pathname is not a directory.",
    ),
];

pub fn install(vm: &mut ScriptVm, registry: &mut CapabilityRegistry, args: Args) {
    let engine = vm.engine_mut();
    engine.register_type_with_name::<OsObject>("OsObject");

    engine.register_fn("args", |os: OsObject| -> Array {
        os.args.as_slice().iter().cloned().map(Dynamic::from).collect()
    });

    engine.register_fn("exit", |_: OsObject| proc::exit(0, None));
    engine.register_fn("exit", |_: OsObject, code: INT| {
        proc::exit(exit_code(code), None)
    });
    engine.register_fn("exit", |_: OsObject, code: INT, message: &str| {
        proc::exit(exit_code(code), Some(message))
    });

    engine.register_fn("getEnv", |_: OsObject, name: &str| -> Dynamic {
        match env::get_env(name) {
            Ok(value) => Dynamic::from(value),
            Err(e) => error_object(format!("os.getEnv({:?}), {}", name, e)),
        }
    });

    engine.register_fn("setEnv", |_: OsObject, name: &str, value: &str| -> Dynamic {
        match env::set_env(name, value) {
            Ok(value) => Dynamic::from(value),
            Err(e) => error_object(format!("os.setEnv({:?}, {:?}), {}", name, value, e)),
        }
    });

    engine.register_fn("readFile", |_: OsObject, path: &str| -> Dynamic {
        match fs::read_file(path) {
            Ok(contents) => Dynamic::from(contents),
            Err(e) => error_object(format!("os.readFile({:?}), {}", path, e)),
        }
    });

    engine.register_fn("writeFile", |_: OsObject, path: &str, contents: &str| -> Dynamic {
        match fs::write_file(path, contents) {
            Ok(()) => Dynamic::from(contents.to_string()),
            Err(e) => error_object(format!("os.writeFile({:?}), {}", path, e)),
        }
    });

    engine.register_fn("rename", |_: OsObject, from: &str, to: &str| -> Dynamic {
        match fs::rename(from, to) {
            Ok(()) => Dynamic::TRUE,
            Err(e) => error_object(format!("os.rename({:?}, {:?}), {}", from, to, e)),
        }
    });

    engine.register_fn("remove", |_: OsObject, path: &str| -> Dynamic {
        outcome("remove", path, fs::remove(path))
    });

    engine.register_fn("chmod", |_: OsObject, path: &str, perms: INT| -> Dynamic {
        match mode(perms) {
            Some(perms) => outcome("chmod", path, fs::chmod(path, perms).map(|()| true)),
            None => error_object(format!("os.chmod({:?}, {}), invalid permissions", path, perms)),
        }
    });

    engine.register_fn("mkdir", |_: OsObject, path: &str, perms: INT| -> Dynamic {
        match mode(perms) {
            Some(perms) => outcome("mkdir", path, fs::mkdir(path, perms).map(|()| true)),
            None => error_object(format!("os.mkdir({:?}, {}), invalid permissions", path, perms)),
        }
    });

    engine.register_fn("mkdirAll", |_: OsObject, path: &str, perms: INT| -> Dynamic {
        match mode(perms) {
            Some(perms) => outcome("mkdirAll", path, fs::mkdir_all(path, perms).map(|()| true)),
            None => error_object(format!(
                "os.mkdirAll({:?}, {}), invalid permissions",
                path, perms
            )),
        }
    });

    engine.register_fn("rmdir", |_: OsObject, path: &str| -> Dynamic {
        outcome("rmdir", path, fs::rmdir(path))
    });

    engine.register_fn("rmdirAll", |_: OsObject, path: &str| -> Dynamic {
        outcome("rmdirAll", path, fs::rmdir_all(path))
    });

    engine.register_fn("find", |_: OsObject, start: &str| -> Dynamic {
        match fs::find(start) {
            Ok(paths) => Dynamic::from_array(paths.into_iter().map(Dynamic::from).collect()),
            Err(e) => error_object(format!("os.find({:?}), {}", start, e)),
        }
    });

    vm.set_global("os", OsObject::new(args));
    document(registry, "os", HELP);
}

fn outcome(function: &str, path: &str, result: hostlib_sys::Result<bool>) -> Dynamic {
    match result {
        Ok(done) => Dynamic::from_bool(done),
        Err(e) => error_object(format!("os.{}({:?}), {}", function, path, e)),
    }
}

fn mode(perms: INT) -> Option<u32> {
    u32::try_from(perms).ok().filter(|perms| *perms <= 0o7777)
}

fn exit_code(code: INT) -> i32 {
    i32::try_from(code).unwrap_or(1)
}
