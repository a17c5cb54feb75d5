//! JSON 文本收集器模块
//!
//! 遍历 `serde_json::Value`，收集需要翻译的字符串叶子及其路径，
//! 翻译完成后再按路径写回一份深拷贝。数字、布尔和 null 不参与翻译。

use std::fmt;

use serde_json::Value;

use super::filters::FieldFilter;

/// 路径中的一段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// 待翻译的字符串叶子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLeaf {
    pub path: Vec<PathSegment>,
    pub text: String,
}

impl TextLeaf {
    /// 人类可读的路径，如 `$.items[0].title`
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            out.push_str(&segment.to_string());
        }
        out
    }
}

/// JSON 文本收集器
#[derive(Debug, Clone, Default)]
pub struct JsonCollector {
    filter: FieldFilter,
}

impl JsonCollector {
    pub fn new(filter: FieldFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &FieldFilter {
        &self.filter
    }

    /// 按文档顺序收集所有需要翻译的字符串
    pub fn collect(&self, value: &Value) -> Vec<TextLeaf> {
        let mut leaves = Vec::new();
        let mut path = Vec::new();
        self.walk(value, None, &mut path, &mut leaves);
        leaves
    }

    fn walk(
        &self,
        value: &Value,
        key: Option<&str>,
        path: &mut Vec<PathSegment>,
        leaves: &mut Vec<TextLeaf>,
    ) {
        match value {
            Value::String(text) => {
                if self.filter.should_translate(key, text) {
                    leaves.push(TextLeaf {
                        path: path.clone(),
                        text: text.clone(),
                    });
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    self.walk(item, None, path, leaves);
                    path.pop();
                }
            }
            Value::Object(map) => {
                for (field, item) in map {
                    // 被排除的字段整棵子树都保持原样
                    if self.filter.is_excluded_field(field) {
                        continue;
                    }
                    path.push(PathSegment::Key(field.clone()));
                    self.walk(item, Some(field), path, leaves);
                    path.pop();
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    /// 把译文写回深拷贝，路径失效的条目会被忽略
    pub fn apply(&self, value: &Value, leaves: &[TextLeaf], translations: &[String]) -> Value {
        let mut output = value.clone();
        for (leaf, translated) in leaves.iter().zip(translations) {
            match resolve_mut(&mut output, &leaf.path) {
                Some(slot) if slot.is_string() => *slot = Value::String(translated.clone()),
                _ => tracing::warn!("译文写回失败，路径不存在: {}", leaf.path_string()),
            }
        }
        output
    }
}

fn resolve_mut<'a>(value: &'a mut Value, path: &[PathSegment]) -> Option<&'a mut Value> {
    path.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.as_object_mut()?.get_mut(key),
        PathSegment::Index(index) => current.as_array_mut()?.get_mut(*index),
    })
}
