//! 状态单元抽象
//!
//! 会话与请求状态机只依赖 `StateCell`：应用中由 `RwSignal` 承载（驱动界面更新），
//! 测试中由 `RefCell` 承载。

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

pub trait StateCell<S> {
    /// 原地修改状态
    fn modify(&self, f: &mut dyn FnMut(&mut S));
}

impl<S> StateCell<S> for RwSignal<S>
where
    S: Send + Sync + 'static,
{
    /// 信号已销毁时忽略
    fn modify(&self, f: &mut dyn FnMut(&mut S)) {
        let _ = self.try_update(|state| f(state));
    }
}

impl<S> StateCell<S> for RefCell<S> {
    fn modify(&self, f: &mut dyn FnMut(&mut S)) {
        f(&mut self.borrow_mut());
    }
}

impl<S, C: StateCell<S>> StateCell<S> for Rc<C> {
    fn modify(&self, f: &mut dyn FnMut(&mut S)) {
        self.as_ref().modify(f)
    }
}
