//! Type inference for terms.

use std::collections::HashMap;

use crate::error::{KernelError, KernelResult};
use crate::mctx::MCtx;
use crate::term::Term;
use crate::ty::Ty;

/// `cctx` maps constant name to type; `fctx`/`bctx` are type stacks with
/// index `0` the innermost (most recently bound/introduced) entry.
pub fn infer_type(
    mctx: &MCtx,
    cctx: &HashMap<String, Ty>,
    fctx: &[Ty],
    bctx: &[Ty],
    t: &Term,
) -> KernelResult<Ty> {
    match t {
        Term::BVar(i) => bctx
            .get(*i)
            .cloned()
            .ok_or(KernelError::InvalidIndex { kind: "bound", index: *i }),
        Term::FVar(i) => fctx
            .get(*i)
            .cloned()
            .ok_or(KernelError::InvalidIndex { kind: "free", index: *i }),
        Term::MVar(m) => mctx.type_of(m).cloned().ok_or_else(|| KernelError::UnknownMeta(m.clone())),
        Term::Const(name) => cctx.get(name).cloned().ok_or_else(|| KernelError::UnknownConst(name.clone())),
        Term::Lam(_, ty, body) => {
            let mut bctx2 = Vec::with_capacity(bctx.len() + 1);
            bctx2.push(ty.clone());
            bctx2.extend_from_slice(bctx);
            let result = infer_type(mctx, cctx, fctx, &bctx2, body)?;
            Ok(Ty::arrow(ty.clone(), result))
        }
        Term::App(func, arg) => {
            let func_ty = infer_type(mctx, cctx, fctx, bctx, func)?;
            match func_ty {
                Ty::Arrow(dom, cod) => {
                    let arg_ty = infer_type(mctx, cctx, fctx, bctx, arg)?;
                    if arg_ty == *dom {
                        Ok(*cod)
                    } else {
                        Err(KernelError::TypeMismatch { expected: *dom, found: arg_ty })
                    }
                }
                other => Err(KernelError::ArrowExpected { found: other }),
            }
        }
    }
}
