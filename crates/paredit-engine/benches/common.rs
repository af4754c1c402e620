// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_lisp_source(defuns: usize) -> String {
    let base = "(defn handler [req]\n  (let [params (:params req)\n        id (get params :id)]\n    (when id\n      {:status 200 :body (str \"item \" id)})))\n\n";
    base.repeat(defuns)
}
