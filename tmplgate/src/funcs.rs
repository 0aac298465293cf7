//! Registry of every gated operation and the namespace bundles.
//!
//! Each constant names one operation; the bundles cover a namespace at
//! a time. [`safe()`] is every operation except the `os` namespace,
//! which can observe the host environment.

use crate::caps::{Bundle, Func};

// ── conv ──────────────────────────────────────────────────────────────────────

pub const CONV_TO_BOOL: Func = Func::new("conv", "toBool");
pub const CONV_TO_BOOLS: Func = Func::new("conv", "toBools");
pub const CONV_TO_STRING: Func = Func::new("conv", "toString");
pub const CONV_TO_STRINGS: Func = Func::new("conv", "toStrings");
pub const CONV_TO_INT: Func = Func::new("conv", "toInt");
pub const CONV_TO_INTS: Func = Func::new("conv", "toInts");
pub const CONV_TO_INT8: Func = Func::new("conv", "toInt8");
pub const CONV_TO_INT8S: Func = Func::new("conv", "toInt8s");
pub const CONV_TO_INT16: Func = Func::new("conv", "toInt16");
pub const CONV_TO_INT16S: Func = Func::new("conv", "toInt16s");
pub const CONV_TO_INT32: Func = Func::new("conv", "toInt32");
pub const CONV_TO_INT32S: Func = Func::new("conv", "toInt32s");
pub const CONV_TO_INT64: Func = Func::new("conv", "toInt64");
pub const CONV_TO_INT64S: Func = Func::new("conv", "toInt64s");
pub const CONV_TO_UINT: Func = Func::new("conv", "toUint");
pub const CONV_TO_UINTS: Func = Func::new("conv", "toUints");
pub const CONV_TO_UINT8: Func = Func::new("conv", "toUint8");
pub const CONV_TO_UINT8S: Func = Func::new("conv", "toUint8s");
pub const CONV_TO_UINT16: Func = Func::new("conv", "toUint16");
pub const CONV_TO_UINT16S: Func = Func::new("conv", "toUint16s");
pub const CONV_TO_UINT32: Func = Func::new("conv", "toUint32");
pub const CONV_TO_UINT32S: Func = Func::new("conv", "toUint32s");
pub const CONV_TO_UINT64: Func = Func::new("conv", "toUint64");
pub const CONV_TO_UINT64S: Func = Func::new("conv", "toUint64s");
pub const CONV_TO_FLOAT32: Func = Func::new("conv", "toFloat32");
pub const CONV_TO_FLOAT32S: Func = Func::new("conv", "toFloat32s");
pub const CONV_TO_FLOAT64: Func = Func::new("conv", "toFloat64");
pub const CONV_TO_FLOAT64S: Func = Func::new("conv", "toFloat64s");

// ── slice ─────────────────────────────────────────────────────────────────────

pub const SLICE_NEW: Func = Func::new("slice", "new");
pub const SLICE_NEW_BOOLS: Func = Func::new("slice", "newBools");
pub const SLICE_NEW_FLOAT64S: Func = Func::new("slice", "newFloat64s");
pub const SLICE_NEW_INT64S: Func = Func::new("slice", "newInt64s");
pub const SLICE_NEW_INTS: Func = Func::new("slice", "newInts");
pub const SLICE_NEW_STRINGS: Func = Func::new("slice", "newStrings");
pub const SLICE_APPEND: Func = Func::new("slice", "append");
pub const SLICE_COMPACT: Func = Func::new("slice", "compact");
pub const SLICE_CONTAINS: Func = Func::new("slice", "contains");
pub const SLICE_LEN: Func = Func::new("slice", "len");
pub const SLICE_PREPEND: Func = Func::new("slice", "prepend");
pub const SLICE_REVERSE: Func = Func::new("slice", "reverse");
pub const SLICE_SORT: Func = Func::new("slice", "sort");
pub const SLICE_UNIQUE: Func = Func::new("slice", "unique");

// ── strings ───────────────────────────────────────────────────────────────────

pub const STRINGS_COMPARE: Func = Func::new("strings", "compare");
pub const STRINGS_CONTAINS: Func = Func::new("strings", "contains");
pub const STRINGS_CONTAINS_ANY: Func = Func::new("strings", "containsAny");
pub const STRINGS_COUNT: Func = Func::new("strings", "count");
pub const STRINGS_EQUAL_FOLD: Func = Func::new("strings", "equalFold");
pub const STRINGS_FIELDS: Func = Func::new("strings", "fields");
pub const STRINGS_HAS_PREFIX: Func = Func::new("strings", "hasPrefix");
pub const STRINGS_HAS_SUFFIX: Func = Func::new("strings", "hasSuffix");
pub const STRINGS_INDEX: Func = Func::new("strings", "index");
pub const STRINGS_JOIN: Func = Func::new("strings", "join");
pub const STRINGS_LAST_INDEX: Func = Func::new("strings", "lastIndex");
pub const STRINGS_REPEAT: Func = Func::new("strings", "repeat");
pub const STRINGS_REPLACE: Func = Func::new("strings", "replace");
pub const STRINGS_REPLACE_ALL: Func = Func::new("strings", "replaceAll");
pub const STRINGS_SPLIT: Func = Func::new("strings", "split");
pub const STRINGS_SPLIT_N: Func = Func::new("strings", "splitN");
pub const STRINGS_TO_LOWER: Func = Func::new("strings", "toLower");
pub const STRINGS_TO_TITLE: Func = Func::new("strings", "toTitle");
pub const STRINGS_TO_UPPER: Func = Func::new("strings", "toUpper");
pub const STRINGS_TRIM: Func = Func::new("strings", "trim");
pub const STRINGS_TRIM_LEFT: Func = Func::new("strings", "trimLeft");
pub const STRINGS_TRIM_PREFIX: Func = Func::new("strings", "trimPrefix");
pub const STRINGS_TRIM_RIGHT: Func = Func::new("strings", "trimRight");
pub const STRINGS_TRIM_SPACE: Func = Func::new("strings", "trimSpace");
pub const STRINGS_TRIM_SUFFIX: Func = Func::new("strings", "trimSuffix");

// ── url ───────────────────────────────────────────────────────────────────────

pub const URL_JOIN_PATH: Func = Func::new("url", "joinPath");
pub const URL_PATH_ESCAPE: Func = Func::new("url", "pathEscape");
pub const URL_PATH_UNESCAPE: Func = Func::new("url", "pathUnescape");
pub const URL_QUERY_ESCAPE: Func = Func::new("url", "queryEscape");
pub const URL_QUERY_UNESCAPE: Func = Func::new("url", "queryUnescape");

// ── path ──────────────────────────────────────────────────────────────────────

pub const PATH_BASE: Func = Func::new("path", "base");
pub const PATH_CLEAN: Func = Func::new("path", "clean");
pub const PATH_DIR: Func = Func::new("path", "dir");
pub const PATH_EXT: Func = Func::new("path", "ext");
pub const PATH_JOIN: Func = Func::new("path", "join");

// ── cmp ───────────────────────────────────────────────────────────────────────

pub const CMP_OR: Func = Func::new("cmp", "or");

// ── dict ──────────────────────────────────────────────────────────────────────

pub const DICT_NEW: Func = Func::new("dict", "new");
pub const DICT_HAS_KEY: Func = Func::new("dict", "hasKey");
pub const DICT_HAS_VALUE: Func = Func::new("dict", "hasValue");
pub const DICT_KEYS: Func = Func::new("dict", "keys");

// ── regexp ────────────────────────────────────────────────────────────────────

pub const REGEXP_FIND_ALL_STRING: Func = Func::new("regexp", "findAllString");
pub const REGEXP_FIND_STRING: Func = Func::new("regexp", "findString");
pub const REGEXP_MATCH_STRING: Func = Func::new("regexp", "matchString");
pub const REGEXP_QUOTE_META: Func = Func::new("regexp", "quoteMeta");
pub const REGEXP_REPLACE_ALL_STRING: Func = Func::new("regexp", "replaceAllString");
pub const REGEXP_SPLIT: Func = Func::new("regexp", "split");

// ── json ──────────────────────────────────────────────────────────────────────

pub const JSON_MARSHAL: Func = Func::new("json", "marshal");
pub const JSON_MARSHAL_INDENT: Func = Func::new("json", "marshalIndent");
pub const JSON_UNMARSHAL: Func = Func::new("json", "unmarshal");
pub const JSON_VALID: Func = Func::new("json", "valid");

// ── os ────────────────────────────────────────────────────────────────────────

pub const OS_ENVIRON: Func = Func::new("os", "environ");
pub const OS_GETENV: Func = Func::new("os", "getenv");
pub const OS_GETPID: Func = Func::new("os", "getpid");
pub const OS_GETWD: Func = Func::new("os", "getwd");
pub const OS_LOOKUP_ENV: Func = Func::new("os", "lookupEnv");
pub const OS_READ_FILE: Func = Func::new("os", "readFile");
pub const OS_TEMP_DIR: Func = Func::new("os", "tempDir");

// ── tmpl ──────────────────────────────────────────────────────────────────────

pub const TMPL_EXEC: Func = Func::new("tmpl", "exec");

// ── Bundles ───────────────────────────────────────────────────────────────────

pub const CONV: Bundle = Bundle("conv");
pub const SLICE: Bundle = Bundle("slice");
pub const STRINGS: Bundle = Bundle("strings");
pub const URL: Bundle = Bundle("url");
pub const PATH: Bundle = Bundle("path");
pub const CMP: Bundle = Bundle("cmp");
pub const DICT: Bundle = Bundle("dict");
pub const REGEXP: Bundle = Bundle("regexp");
pub const JSON: Bundle = Bundle("json");
pub const OS: Bundle = Bundle("os");
pub const TMPL: Bundle = Bundle("tmpl");

static ALL: &[Func] = &[
    CONV_TO_BOOL,
    CONV_TO_BOOLS,
    CONV_TO_STRING,
    CONV_TO_STRINGS,
    CONV_TO_INT,
    CONV_TO_INTS,
    CONV_TO_INT8,
    CONV_TO_INT8S,
    CONV_TO_INT16,
    CONV_TO_INT16S,
    CONV_TO_INT32,
    CONV_TO_INT32S,
    CONV_TO_INT64,
    CONV_TO_INT64S,
    CONV_TO_UINT,
    CONV_TO_UINTS,
    CONV_TO_UINT8,
    CONV_TO_UINT8S,
    CONV_TO_UINT16,
    CONV_TO_UINT16S,
    CONV_TO_UINT32,
    CONV_TO_UINT32S,
    CONV_TO_UINT64,
    CONV_TO_UINT64S,
    CONV_TO_FLOAT32,
    CONV_TO_FLOAT32S,
    CONV_TO_FLOAT64,
    CONV_TO_FLOAT64S,
    SLICE_NEW,
    SLICE_NEW_BOOLS,
    SLICE_NEW_FLOAT64S,
    SLICE_NEW_INT64S,
    SLICE_NEW_INTS,
    SLICE_NEW_STRINGS,
    SLICE_APPEND,
    SLICE_COMPACT,
    SLICE_CONTAINS,
    SLICE_LEN,
    SLICE_PREPEND,
    SLICE_REVERSE,
    SLICE_SORT,
    SLICE_UNIQUE,
    STRINGS_COMPARE,
    STRINGS_CONTAINS,
    STRINGS_CONTAINS_ANY,
    STRINGS_COUNT,
    STRINGS_EQUAL_FOLD,
    STRINGS_FIELDS,
    STRINGS_HAS_PREFIX,
    STRINGS_HAS_SUFFIX,
    STRINGS_INDEX,
    STRINGS_JOIN,
    STRINGS_LAST_INDEX,
    STRINGS_REPEAT,
    STRINGS_REPLACE,
    STRINGS_REPLACE_ALL,
    STRINGS_SPLIT,
    STRINGS_SPLIT_N,
    STRINGS_TO_LOWER,
    STRINGS_TO_TITLE,
    STRINGS_TO_UPPER,
    STRINGS_TRIM,
    STRINGS_TRIM_LEFT,
    STRINGS_TRIM_PREFIX,
    STRINGS_TRIM_RIGHT,
    STRINGS_TRIM_SPACE,
    STRINGS_TRIM_SUFFIX,
    URL_JOIN_PATH,
    URL_PATH_ESCAPE,
    URL_PATH_UNESCAPE,
    URL_QUERY_ESCAPE,
    URL_QUERY_UNESCAPE,
    PATH_BASE,
    PATH_CLEAN,
    PATH_DIR,
    PATH_EXT,
    PATH_JOIN,
    CMP_OR,
    DICT_NEW,
    DICT_HAS_KEY,
    DICT_HAS_VALUE,
    DICT_KEYS,
    REGEXP_FIND_ALL_STRING,
    REGEXP_FIND_STRING,
    REGEXP_MATCH_STRING,
    REGEXP_QUOTE_META,
    REGEXP_REPLACE_ALL_STRING,
    REGEXP_SPLIT,
    JSON_MARSHAL,
    JSON_MARSHAL_INDENT,
    JSON_UNMARSHAL,
    JSON_VALID,
    OS_ENVIRON,
    OS_GETENV,
    OS_GETPID,
    OS_GETWD,
    OS_LOOKUP_ENV,
    OS_READ_FILE,
    OS_TEMP_DIR,
    TMPL_EXEC,
];

/// Every registered operation.
pub fn all() -> Vec<Func> {
    ALL.to_vec()
}

/// Every operation except the `os` namespace.
pub fn safe() -> Vec<Func> {
    ALL.iter().copied().filter(|f| f.namespace != "os").collect()
}

pub(crate) fn find(namespace: &str, name: &str) -> Option<Func> {
    ALL.iter()
        .copied()
        .find(|f| f.namespace == namespace && f.name == name)
}

pub(crate) fn by_namespace(namespace: &str) -> Vec<Func> {
    ALL.iter()
        .copied()
        .filter(|f| f.namespace == namespace)
        .collect()
}

pub(crate) fn has_namespace(namespace: &str) -> bool {
    ALL.iter().any(|f| f.namespace == namespace)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for f in ALL {
            assert!(seen.insert(*f), "duplicate registration: {f}");
        }
    }

    #[test]
    fn safe_excludes_os() {
        let safe = safe();
        assert!(safe.iter().all(|f| f.namespace != "os"));
        assert_eq!(safe.len() + by_namespace("os").len(), ALL.len());
    }

    #[test]
    fn lookup() {
        assert_eq!(find("url", "joinPath"), Some(URL_JOIN_PATH));
        assert_eq!(find("url", "nope"), None);
        assert!(has_namespace("tmpl"));
        assert!(!has_namespace("filesystem"));
    }
}
