//! # Environment 模块
//!
//! 变量作用域链。
//!
//! 每个 `Environment` 持有本层绑定和可选的外层环境，整体是一棵以全局环境为根的树。
//! 没有闭包，子作用域从不被保留：进入块时通过 [`Environment::enter_scope`] 把当前
//! 环境下沉为外层，[`Scope`] 离开作用域（正常结束或出错返回）时自动恢复。

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::error::RuntimeError;
use crate::script::Token;
use crate::value::Value;

/// 作用域环境
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Box<Environment>>,
}

impl Environment {
    /// 创建全局环境
    pub fn new() -> Self {
        Self::default()
    }

    /// 在当前作用域绑定变量
    ///
    /// 同一作用域内重复定义直接覆盖。
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// 由内向外查找变量
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.lookup(&name.lexeme)
            .cloned()
            .ok_or_else(|| RuntimeError::undefined_variable(name))
    }

    /// 给最近一层已有的绑定赋值
    ///
    /// 赋值从不创建新绑定，整条链上都不存在时报错。
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            return Ok(());
        }

        match &mut self.enclosing {
            Some(enclosing) => enclosing.assign(name, value),
            None => Err(RuntimeError::undefined_variable(name)),
        }
    }

    /// 按名字查找，不产生错误
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        match self.values.get(name) {
            Some(value) => Some(value),
            None => self.enclosing.as_ref()?.lookup(name),
        }
    }

    /// 是否在本层（不含外层）绑定了 `name`
    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// 嵌套深度，全局环境为 0
    pub fn depth(&self) -> usize {
        self.enclosing.as_ref().map_or(0, |e| e.depth() + 1)
    }

    /// 进入一层新的块作用域
    pub fn enter_scope(&mut self) -> Scope<'_> {
        let parent = std::mem::take(self);
        self.enclosing = Some(Box::new(parent));
        tracing::trace!(depth = self.depth(), "enter scope");
        Scope { env: self }
    }
}

/// 块作用域守卫
///
/// 解引用为内层环境；drop 时丢弃内层绑定并恢复外层。
#[derive(Debug)]
pub struct Scope<'a> {
    env: &'a mut Environment,
}

impl Deref for Scope<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.env
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if let Some(parent) = self.env.enclosing.take() {
            *self.env = *parent;
        }
        tracing::trace!(depth = self.env.depth(), "exit scope");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::Identifier, name, None, 1)
    }

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        assert_eq!(env.get(&ident("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_redefine_overwrites() {
        let mut env = Environment::new();
        env.define("a", Value::from("before"));
        env.define("a", Value::from("after"));
        assert_eq!(env.get(&ident("a")).unwrap(), Value::from("after"));
    }

    #[test]
    fn test_get_undefined() {
        let env = Environment::new();
        let err = env.get(&ident("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'missing'.");
    }

    #[test]
    fn test_assign_requires_existing_binding() {
        let mut env = Environment::new();
        let err = env.assign(&ident("a"), Value::Nil).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
        // 失败的赋值不会留下绑定
        assert!(env.lookup("a").is_none());

        env.define("a", Value::Nil);
        env.assign(&ident("a"), Value::Bool(true)).unwrap();
        assert_eq!(env.lookup("a"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_scope_shadows_and_restores() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));

        {
            let mut scope = env.enter_scope();
            assert_eq!(scope.depth(), 1);
            // 外层可见
            assert_eq!(scope.get(&ident("a")).unwrap(), Value::Number(1.0));

            scope.define("a", Value::Number(2.0));
            assert_eq!(scope.get(&ident("a")).unwrap(), Value::Number(2.0));
            assert!(scope.contains_local("a"));
        }

        assert_eq!(env.depth(), 0);
        assert_eq!(env.get(&ident("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_assign_in_scope_updates_nearest_binding() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));

        {
            let mut scope = env.enter_scope();
            scope.assign(&ident("a"), Value::Number(5.0)).unwrap();
            assert!(!scope.contains_local("a"));
        }

        assert_eq!(env.lookup("a"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_inner_definitions_are_discarded() {
        let mut env = Environment::new();
        {
            let mut outer = env.enter_scope();
            {
                let mut inner = outer.enter_scope();
                assert_eq!(inner.depth(), 2);
                inner.define("tmp", Value::Nil);
            }
            assert_eq!(outer.depth(), 1);
            assert!(outer.lookup("tmp").is_none());
        }
        assert_eq!(env.depth(), 0);
        assert!(env.lookup("tmp").is_none());
    }
}
