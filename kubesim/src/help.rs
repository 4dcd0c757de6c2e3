pub const USAGE: &str = "\
Available commands:
  kubectl get <resource> [name] [-n namespace]
  kubectl describe <resource> <name> [-n namespace]
  kubectl delete <resource> <name> [-n namespace]
  kubectl apply -f <file> (simulated)

Resources: pods, deployments, daemonsets, namespaces
Shortcuts: po, deploy, ds, ns

Examples:
  kubectl get pods
  kubectl get pods -n default
  kubectl describe pod <pod-name>
  kubectl delete pod <pod-name> -n default
  kubectl get deployments
  kubectl get namespaces";
